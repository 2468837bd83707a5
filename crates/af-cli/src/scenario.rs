//! The capacity-4 walkthrough: fill, overflow, drain one, refill, drain.
//!
//! Every action is followed by the number of idle ticks it takes for the
//! relays to settle, so the table shows flags as each domain sees them.

use af_fifo::{channel, Consumer, Producer};
use tabled::{builder::Builder, settings::Style};

pub struct Step {
    pub action: String,
    pub result: String,
    pub full: bool,
    pub empty: bool,
    pub producer_occupancy: u32,
    pub consumer_occupancy: u32,
}

struct Walk {
    tx: Producer,
    rx: Consumer,
    steps: Vec<Step>,
}

impl Walk {
    fn record(&mut self, action: String, result: String) {
        self.steps.push(Step {
            action,
            result,
            full: self.tx.is_full(),
            empty: self.rx.is_empty(),
            producer_occupancy: self.tx.occupancy(),
            consumer_occupancy: self.rx.occupancy(),
        });
    }

    fn push(&mut self, label: char) {
        let accepted = self.tx.try_push(label as u64);
        let result = if accepted { "stored" } else { "rejected" };
        self.record(format!("push {label}"), result.to_string());
    }

    fn pop(&mut self) {
        let result = match self.rx.try_pop() {
            Some(word) => char::from_u32(word as u32)
                .map(|c| c.to_string())
                .unwrap_or_else(|| format!("{word:#x}")),
            None => "empty".to_string(),
        };
        self.record("pop".to_string(), result);
    }

    fn settle(&mut self) {
        for _ in 0..2 {
            self.tx.tick();
            self.rx.tick();
        }
        self.record("settle (2 ticks each)".to_string(), String::new());
    }
}

/// Run the walkthrough and return each step.
pub fn run() -> anyhow::Result<Vec<Step>> {
    let (tx, rx) = channel(32, 2)?;
    let mut walk = Walk {
        tx,
        rx,
        steps: Vec::new(),
    };

    for label in ['A', 'B', 'C', 'D'] {
        walk.push(label);
    }
    walk.push('F');
    walk.settle();
    walk.pop();
    walk.settle();
    walk.push('E');
    walk.settle();
    for _ in 0..5 {
        walk.pop();
    }
    Ok(walk.steps)
}

pub fn format_table(steps: &[Step]) -> String {
    let mut builder = Builder::default();
    builder.push_record(vec![
        "#",
        "Action",
        "Result",
        "Full",
        "Empty",
        "Occ (producer)",
        "Occ (consumer)",
    ]);
    for (i, step) in steps.iter().enumerate() {
        builder.push_record(vec![
            (i + 1).to_string(),
            step.action.clone(),
            step.result.clone(),
            step.full.to_string(),
            step.empty.to_string(),
            step.producer_occupancy.to_string(),
            step.consumer_occupancy.to_string(),
        ]);
    }
    builder.build().with(Style::modern()).to_string()
}
