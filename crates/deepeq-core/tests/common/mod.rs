use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use deepeq_core::reflect::{Reflect, SequenceView, Shape};
use deepeq_core::{reflect_enum, reflect_record};

/// The record used throughout the comparison scenarios
#[allow(dead_code)]
pub struct Person {
    pub name: String,
    pub age: u32,
    pub hobbies: Vec<String>,
}

reflect_record!(Person { name, age, hobbies });

#[allow(dead_code)]
pub fn person(name: &str, age: u32, hobbies: &[&str]) -> Person {
    Person {
        name: name.to_string(),
        age,
        hobbies: hobbies.iter().map(|h| h.to_string()).collect(),
    }
}

/// A record with a field only this module can read
#[allow(dead_code)]
pub struct SimpleStruct {
    pub name: String,
    hidden_field: i32,
}

reflect_record!(SimpleStruct { name, hidden_field });

impl SimpleStruct {
    #[allow(dead_code)]
    pub fn new(name: &str, hidden_field: i32) -> Self {
        Self {
            name: name.to_string(),
            hidden_field,
        }
    }
}

/// Singly linked node that can close a cycle through `next`
#[allow(dead_code)]
pub struct Node {
    pub value: u32,
    pub next: RefCell<Option<Rc<Node>>>,
}

reflect_record!(Node { value, next });

/// Build a ring of nodes carrying `values`, returning its first node
///
/// Call [`break_ring`] when done so the nodes are freed.
#[allow(dead_code)]
pub fn ring(values: &[u32]) -> Rc<Node> {
    let nodes: Vec<Rc<Node>> = values
        .iter()
        .map(|&value| {
            Rc::new(Node {
                value,
                next: RefCell::new(None),
            })
        })
        .collect();

    for (i, node) in nodes.iter().enumerate() {
        let next = nodes[(i + 1) % nodes.len()].clone();
        *node.next.borrow_mut() = Some(next);
    }
    nodes[0].clone()
}

#[allow(dead_code)]
pub fn break_ring(head: &Rc<Node>) {
    let mut current = head.next.borrow_mut().take();
    while let Some(node) = current {
        current = node.next.borrow_mut().take();
    }
}

/// Thread-safe node whose cycle runs through a `Mutex`
#[allow(dead_code)]
pub struct SyncNode {
    pub value: u32,
    pub next: Mutex<Option<Arc<SyncNode>>>,
}

reflect_record!(SyncNode { value, next });

/// Build a ring of `SyncNode`s carrying `values`, returning its first node
#[allow(dead_code)]
pub fn sync_ring(values: &[u32]) -> Arc<SyncNode> {
    let nodes: Vec<Arc<SyncNode>> = values
        .iter()
        .map(|&value| {
            Arc::new(SyncNode {
                value,
                next: Mutex::new(None),
            })
        })
        .collect();

    for (i, node) in nodes.iter().enumerate() {
        let next = nodes[(i + 1) % nodes.len()].clone();
        *node.next.lock().unwrap() = Some(next);
    }
    nodes[0].clone()
}

#[allow(dead_code)]
pub fn break_sync_ring(head: &Arc<SyncNode>) {
    let mut current = head.next.lock().unwrap().take();
    while let Some(node) = current {
        current = node.next.lock().unwrap().take();
    }
}

#[allow(dead_code)]
pub enum Figure {
    Circle { radius: f64 },
    Rect(u32, u32),
    Empty,
}

reflect_enum!(Figure {
    Circle { radius },
    Rect(w, h),
    Empty,
});

/// Shared payload referenced twice from one value
#[allow(dead_code)]
pub struct SharedPair {
    pub left: Rc<Vec<u8>>,
    pub right: Rc<Vec<u8>>,
}

reflect_record!(SharedPair { left, right });

#[allow(dead_code)]
pub fn shared_pair(payload: &[u8]) -> SharedPair {
    let shared = Rc::new(payload.to_vec());
    SharedPair {
        left: shared.clone(),
        right: shared,
    }
}

/// A sequence that distinguishes nil from empty
#[allow(dead_code)]
pub struct NilableList(pub Option<Vec<u8>>);

impl Reflect for NilableList {
    fn reflect(&self) -> Shape<'_> {
        Shape::Slice(self.0.as_ref().map(|v| v as &dyn SequenceView))
    }
}

/// A function slot that may be nil
#[allow(dead_code)]
pub struct Callback(pub Option<fn() -> u8>);

impl Reflect for Callback {
    fn reflect(&self) -> Shape<'_> {
        Shape::Func {
            nil: self.0.is_none(),
        }
    }
}

#[allow(dead_code)]
pub fn one() -> u8 {
    1
}
