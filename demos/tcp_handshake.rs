//! TCP Connection State Machine
//!
//! This example drives the RFC 793 connection diagram through an active open
//! and an active close.
//!
//! Key concepts:
//! - One event name (`close`) leading out of several states
//! - Enter/leave/transition handlers
//! - Priorities: an urgent reset racing a queued event
//!
//! Run with: RUST_LOG=prio_fsm=debug cargo run --example tcp_handshake

use prio_fsm::{FsmError, Machine, Mode};
use tracing_subscriber::EnvFilter;

const STATES: [&str; 9] = [
    "closed",
    "syn_sent",
    "established",
    "fin_wait_1",
    "fin_wait_2",
    "closing",
    "time_wait",
    "close_wait",
    "last_ack",
];

const EDGES: [(&str, &str, &str); 14] = [
    ("sendsyn", "closed", "syn_sent"),
    ("syntimeout", "syn_sent", "closed"),
    ("close", "syn_sent", "closed"),
    ("recvsynack", "syn_sent", "established"),
    ("close", "established", "fin_wait_1"),
    ("recvfinack1", "fin_wait_1", "fin_wait_2"),
    ("recvfin1", "fin_wait_2", "time_wait"),
    ("timewaitout", "time_wait", "closed"),
    ("recvfin2", "fin_wait_1", "closing"),
    ("recvfinack2", "closing", "time_wait"),
    ("recvfin3", "established", "close_wait"),
    ("sendfin3", "close_wait", "last_ack"),
    ("recvfinack3", "last_ack", "closed"),
    ("reset", "established", "closed"),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== TCP Connection State Machine ===\n");

    let machine = Machine::new(Mode::Asynchronous, "closed")?;
    for state in STATES {
        machine.add_state(state);
    }
    for (event, from, to) in EDGES {
        machine.add_event(event, from, to)?;
    }

    if let Some(established) = machine.get_state("established") {
        established.on_enter(|state| println!("  [enter] {} - connection is up", state.name()));
        established.on_leave(|state| println!("  [leave] {}", state.name()));
    }
    if let Some(close) = machine.get_event("close", "established", "fin_wait_1") {
        close.on_transition(|event| println!("  [send]  FIN ({})", event.name()));
    }

    println!("Active open and close:");
    for event in [
        "sendsyn",
        "recvsynack",
        "close",
        "recvfinack1",
        "recvfin1",
        "timewaitout",
    ] {
        machine.emit(event)?;
        println!("  {event:<12} -> {}", machine.current_state());
    }

    println!("\nOut-of-order event:");
    match machine.emit("recvsynack") {
        Err(FsmError::IllegalStateForEvent { event, state }) => {
            println!("  {event} rejected in state {state}")
        }
        other => println!("  unexpected outcome: {other:?}"),
    }

    println!("\nQueued events with an urgent reset:");
    machine.emit("sendsyn")?;
    machine.emit("recvsynack")?;
    let queued = vec![
        ("recvfin3", machine.emit_async("recvfin3")),
        ("reset", machine.emit_with_priority_async(100, "reset")),
    ];
    for (event, emission) in queued {
        match emission.wait() {
            Ok(()) => println!("  {event:<12} applied"),
            Err(err) => println!("  {event:<12} failed: {err}"),
        }
    }
    println!("  final state: {}", machine.current_state());

    machine.close();
    println!("\n=== Example Complete ===");
    Ok(())
}
