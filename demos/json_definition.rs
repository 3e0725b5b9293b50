//! Machine From a JSON Definition
//!
//! This example loads a turnstile's states, events and dispatch settings
//! from JSON, then lets several threads push coins and people through it.
//!
//! Run with: cargo run --example json_definition

use prio_fsm::{FsmError, MachineDefinition};
use std::sync::Arc;
use std::thread;

const TURNSTILE: &str = r#"{
    "initial": "locked",
    "config": { "mode": "caller-driven", "capacity": 32 },
    "events": [
        { "name": "coin", "from": "locked", "to": "unlocked" },
        { "name": "push", "from": "unlocked", "to": "locked" }
    ]
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("=== Turnstile From JSON ===\n");

    let definition = MachineDefinition::from_json(TURNSTILE)?;
    println!("Loaded definition:\n{}\n", definition.to_json()?);

    let machine = Arc::new(definition.build()?);
    println!("Mode: {:?}, states: {:?}\n", machine.mode(), machine.states());

    let visitors: Vec<_> = (0..4)
        .map(|id| {
            let machine = Arc::clone(&machine);
            thread::spawn(move || {
                let mut passed = 0;
                for _ in 0..5 {
                    let _ = machine.emit("coin");
                    match machine.emit("push") {
                        Ok(()) => passed += 1,
                        Err(FsmError::IllegalStateForEvent { .. }) => {}
                        Err(err) => eprintln!("visitor {id}: {err}"),
                    }
                }
                (id, passed)
            })
        })
        .collect();

    for visitor in visitors {
        let (id, passed) = visitor.join().expect("visitor thread panicked");
        println!("  visitor {id} passed {passed} times");
    }
    println!("\nFinal state: {}", machine.current_state());

    machine.close();
    println!("\n=== Example Complete ===");
    Ok(())
}
