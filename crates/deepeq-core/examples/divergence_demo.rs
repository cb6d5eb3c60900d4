//! Divergence Report Demonstration
//!
//! Walks through the comparison rules and prints the report for each case.
//!
//! Key concepts illustrated:
//! 1. Path-annotated reports for records, sequences and maps
//! 2. NaN and nil handling
//! 3. Cycle-safe comparison of shared, self-referencing values
//! 4. Options: strict cycle policy and depth limit

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use deepeq_core::{
    deep_equal, deep_equal_with, reflect_enum, reflect_record, CompareOptions, CyclePolicy,
    DynValue, Verdict,
};

struct Person {
    name: String,
    age: u32,
    hobbies: Vec<String>,
}

reflect_record!(Person { name, age, hobbies });

enum Status {
    Active { since: u32 },
    Suspended(String),
}

reflect_enum!(Status {
    Active { since },
    Suspended(reason),
});

struct Node {
    value: u32,
    next: RefCell<Option<Rc<Node>>>,
}

reflect_record!(Node { value, next });

fn person(hobbies: &[&str]) -> Person {
    Person {
        name: "A".to_string(),
        age: 22,
        hobbies: hobbies.iter().map(|h| h.to_string()).collect(),
    }
}

fn self_loop(value: u32) -> Rc<Node> {
    let node = Rc::new(Node {
        value,
        next: RefCell::new(None),
    });
    *node.next.borrow_mut() = Some(node.clone());
    node
}

fn show(label: &str, verdict: Verdict) {
    match verdict {
        Ok(()) => println!("  {:<28} equal", label),
        Err(div) => println!(
            "  {:<28} {} at '{}'\n  {:<28} {}",
            label,
            div.code(),
            div.path_string(),
            "",
            div
        ),
    }
}

fn main() {
    println!("=== deepeq Divergence Demo ===\n");

    // ===== Part 1: Records, sequences, maps =====
    println!("## Part 1: Structure\n");
    show(
        "hobbies differ",
        deep_equal(&person(&["Surfing"]), &person(&[])),
    );
    show(
        "same content",
        deep_equal(&person(&["Surfing"]), &person(&["Surfing"])),
    );

    let mut left = BTreeMap::new();
    left.insert("ops".to_string(), vec![1u8, 2]);
    let mut right = BTreeMap::new();
    right.insert("ops".to_string(), vec![1u8, 3]);
    show("map values", deep_equal(&left, &right));

    show(
        "enum variants",
        deep_equal(
            &Status::Active { since: 2020 },
            &Status::Suspended("billing".to_string()),
        ),
    );

    // ===== Part 2: NaN and nil =====
    println!("\n## Part 2: NaN and nil\n");
    show("NaN vs NaN", deep_equal(&vec![f64::NAN], &vec![f64::NAN]));
    show("nil vs nil", deep_equal(&DynValue::nil(), &DynValue::nil()));
    show("nil vs value", deep_equal(&DynValue::nil(), &DynValue::new(1u8)));
    show(
        "None vs empty",
        deep_equal(&None::<Vec<u8>>, &Some(Vec::<u8>::new())),
    );

    // ===== Part 3: Cycles =====
    println!("\n## Part 3: Cycles\n");
    let (a, b) = (self_loop(1), self_loop(1));
    show("self loops (optimistic)", deep_equal(&a, &b));

    let strict = CompareOptions::default().with_cycle_policy(CyclePolicy::Strict);
    show("self loops (strict)", deep_equal_with(&a, &b, &strict));

    let shallow = CompareOptions::default().with_max_depth(2);
    show("self loops (max depth 2)", deep_equal_with(&a, &b, &shallow));

    a.next.borrow_mut().take();
    b.next.borrow_mut().take();
}
