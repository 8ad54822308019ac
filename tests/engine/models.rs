use std::sync::{Arc, Mutex};

use dictdesc::reflect;

use crate::{Gender, OrderStatus};

pub struct Audit {
    pub created_by: String,
    pub gender: String,
    pub gender_desc: String,
}

pub struct Customer {
    pub name: String,
    pub gender: Option<String>,
    pub label: Option<String>,
}

pub struct Line {
    pub status: String,
    pub status_desc: String,
    pub tags: Vec<String>,
}

pub struct Order {
    pub audit: Audit,
    pub id: u64,
    pub status: String,
    pub status_desc: String,
    pub customer: Option<Customer>,
    pub lines: Vec<Line>,
}

/// Self-referencing through a shared handle; the only way to build a cycle.
pub struct Person {
    pub gender: String,
    pub gender_desc: String,
    pub friend: Option<Arc<Mutex<Person>>>,
}

/// Singly linked chain of arbitrary length.
pub struct Link {
    pub status: String,
    pub status_desc: String,
    pub next: Option<Box<Link>>,
}

reflect!(Audit {
    created_by,
    gender,
    gender_desc: dict(Gender),
});

reflect!(Customer {
    name,
    gender,
    label: dict(Gender, gender),
});

reflect!(Line {
    status,
    status_desc: dict(OrderStatus),
    tags,
});

reflect! {
    Order extends audit {
        id,
        status,
        status_desc: dict(OrderStatus),
        customer,
        lines,
    }
}

reflect!(Person {
    gender,
    gender_desc: dict(Gender),
    friend,
});

reflect!(Link {
    status,
    status_desc: dict(OrderStatus),
    next,
});

impl Audit {
    pub fn new(gender: &str) -> Self {
        Self {
            created_by: "system".to_string(),
            gender: gender.to_string(),
            gender_desc: String::new(),
        }
    }
}

impl Line {
    pub fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
            status_desc: String::new(),
            tags: vec!["gift".to_string()],
        }
    }
}

impl Order {
    pub fn new(status: &str) -> Self {
        Self {
            audit: Audit::new("m"),
            id: 1,
            status: status.to_string(),
            status_desc: String::new(),
            customer: None,
            lines: Vec::new(),
        }
    }
}

impl Person {
    pub fn new(gender: &str) -> Self {
        Self {
            gender: gender.to_string(),
            gender_desc: String::new(),
            friend: None,
        }
    }

    pub fn shared(gender: &str) -> Arc<Mutex<Person>> {
        Arc::new(Mutex::new(Self::new(gender)))
    }
}

impl Link {
    /// A chain of `len` links, all with status `pending`.
    pub fn chain(len: usize) -> Link {
        let mut head = Link {
            status: "pending".to_string(),
            status_desc: String::new(),
            next: None,
        };
        for _ in 1..len {
            head = Link {
                status: "pending".to_string(),
                status_desc: String::new(),
                next: Some(Box::new(head)),
            };
        }
        head
    }

    /// Description of every link, head first.
    pub fn descriptions(&self) -> Vec<&str> {
        let mut descriptions = Vec::new();
        let mut current = Some(self);
        while let Some(link) = current {
            descriptions.push(link.status_desc.as_str());
            current = link.next.as_deref();
        }
        descriptions
    }
}

impl Drop for Link {
    // Iterative, so long chains do not overflow the stack.
    fn drop(&mut self) {
        let mut next = self.next.take();
        while let Some(mut link) = next {
            next = link.next.take();
        }
    }
}
