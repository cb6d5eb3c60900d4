//! Demo command
//!
//! Usage: deepeq demo [--scenario <NAME>]
//!
//! Runs a fixed set of comparisons and checks each verdict against the
//! expected one.

use std::cell::RefCell;
use std::rc::Rc;

use clap::Args;
use deepeq_core::{deep_equal, reflect_record, DynValue, Verdict};

use super::Outcome;

#[derive(Debug, Args)]
pub struct DemoArgs {
    /// Only run scenarios whose name contains this text
    #[arg(short, long)]
    pub scenario: Option<String>,
}

struct Person {
    name: String,
    age: u32,
    hobbies: Vec<String>,
}

reflect_record!(Person { name, age, hobbies });

impl Person {
    fn new(name: &str, age: u32, hobbies: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            age,
            hobbies: hobbies.iter().map(|h| h.to_string()).collect(),
        }
    }
}

struct Account {
    name: String,
    hidden_field: i32,
}

reflect_record!(Account { name, hidden_field });

struct Node {
    value: u32,
    next: RefCell<Option<Rc<Node>>>,
}

reflect_record!(Node { value, next });

fn self_loop(value: u32) -> Rc<Node> {
    let node = Rc::new(Node {
        value,
        next: RefCell::new(None),
    });
    *node.next.borrow_mut() = Some(node.clone());
    node
}

/// Drop the self reference so the node can be freed
fn break_loop(node: &Rc<Node>) {
    node.next.borrow_mut().take();
}

struct Scenario {
    name: &'static str,
    expect_equal: bool,
    run: fn() -> Verdict,
}

fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "person-hobbies-differ",
            expect_equal: false,
            run: || {
                deep_equal(
                    &Person::new("A", 22, &["Surfing"]),
                    &Person::new("A", 22, &[]),
                )
            },
        },
        Scenario {
            name: "person-equal",
            expect_equal: true,
            run: || {
                deep_equal(
                    &Person::new("A", 22, &["Surfing"]),
                    &Person::new("A", 22, &["Surfing"]),
                )
            },
        },
        Scenario {
            name: "nil-nil",
            expect_equal: true,
            run: || deep_equal(&DynValue::nil(), &DynValue::nil()),
        },
        Scenario {
            name: "nil-value",
            expect_equal: false,
            run: || deep_equal(&DynValue::nil(), &DynValue::new(Person::new("A", 22, &[]))),
        },
        Scenario {
            name: "nan",
            expect_equal: true,
            run: || deep_equal(&vec![f64::NAN], &vec![f64::NAN]),
        },
        Scenario {
            name: "nil-vs-empty",
            expect_equal: false,
            run: || deep_equal(&None::<Vec<u8>>, &Some(Vec::<u8>::new())),
        },
        Scenario {
            name: "cycle",
            expect_equal: true,
            run: || {
                let (a, b) = (self_loop(1), self_loop(1));
                let verdict = deep_equal(&a, &b);
                break_loop(&a);
                break_loop(&b);
                verdict
            },
        },
        Scenario {
            name: "hidden-field",
            expect_equal: false,
            run: || {
                deep_equal(
                    &Account {
                        name: "x".to_string(),
                        hidden_field: -1,
                    },
                    &Account {
                        name: "x".to_string(),
                        hidden_field: 0,
                    },
                )
            },
        },
    ]
}

/// Execute demo command
pub fn execute(args: DemoArgs) -> Result<Outcome, Box<dyn std::error::Error>> {
    let selected: Vec<Scenario> = scenarios()
        .into_iter()
        .filter(|s| {
            args.scenario
                .as_deref()
                .map_or(true, |filter| s.name.contains(filter))
        })
        .collect();

    if selected.is_empty() {
        return Err(format!(
            "no scenario matches '{}'",
            args.scenario.unwrap_or_default()
        )
        .into());
    }

    let mut outcome = Outcome::Equal;
    for scenario in &selected {
        let verdict = (scenario.run)();
        let as_expected = verdict.is_ok() == scenario.expect_equal;
        let mark = if as_expected { "✓" } else { "✗" };

        match verdict {
            Ok(()) => println!("{} {}: equal", mark, scenario.name),
            Err(divergence) => println!("{} {}: {}", mark, scenario.name, divergence),
        }

        if !as_expected {
            outcome = Outcome::Different;
        }
    }

    Ok(outcome)
}
