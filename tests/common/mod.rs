//! Shared fixtures: a TCP connection machine after RFC 793, figure 6.

#![allow(dead_code)]

use prio_fsm::{Machine, Mode};

pub const CLOSED: &str = "closed";
pub const SYN_SENT: &str = "syn_sent";
pub const ESTABLISHED: &str = "established";
pub const FIN_WAIT1: &str = "fin_wait_1";
pub const FIN_WAIT2: &str = "fin_wait_2";
pub const CLOSING: &str = "closing";
pub const TIME_WAIT: &str = "time_wait";
pub const CLOSE_WAIT: &str = "close_wait";
pub const LAST_ACK: &str = "last_ack";

pub const STATES: [&str; 9] = [
    CLOSED,
    SYN_SENT,
    ESTABLISHED,
    FIN_WAIT1,
    FIN_WAIT2,
    CLOSING,
    TIME_WAIT,
    CLOSE_WAIT,
    LAST_ACK,
];

pub const ET_CLOSE: &str = "close";
pub const ET_SENDSYN: &str = "sendsyn";
pub const ET_RECVSYNACK: &str = "recvsynack";
pub const ET_SYNTIMEOUT: &str = "syntimeout";
pub const ET_SENDFIN3: &str = "sendfin3";
pub const ET_RECVFIN1: &str = "recvfin1";
pub const ET_RECVFIN2: &str = "recvfin2";
pub const ET_RECVFIN3: &str = "recvfin3";
pub const ET_RECVFINACK1: &str = "recvfinack1";
pub const ET_RECVFINACK2: &str = "recvfinack2";
pub const ET_RECVFINACK3: &str = "recvfinack3";
pub const ET_TIMEWAITOUT: &str = "timewaitout";

pub const MODES: [Mode; 3] = [
    Mode::Asynchronous,
    Mode::CallerDriven,
    Mode::CallerDrivenSerialized,
];

/// Active open followed by active close, with the state after each step.
pub const ACTIVE_SESSION: [(&str, &str); 6] = [
    (ET_SENDSYN, SYN_SENT),
    (ET_RECVSYNACK, ESTABLISHED),
    (ET_CLOSE, FIN_WAIT1),
    (ET_RECVFINACK1, FIN_WAIT2),
    (ET_RECVFIN1, TIME_WAIT),
    (ET_TIMEWAITOUT, CLOSED),
];

pub fn tcp_machine(mode: Mode) -> Machine {
    let machine = Machine::new(mode, CLOSED).unwrap();
    for state in STATES {
        machine.add_state(state);
    }

    let edges = [
        (ET_SENDSYN, CLOSED, SYN_SENT),
        (ET_SYNTIMEOUT, SYN_SENT, CLOSED),
        (ET_CLOSE, SYN_SENT, CLOSED),
        (ET_RECVSYNACK, SYN_SENT, ESTABLISHED),
        (ET_CLOSE, ESTABLISHED, FIN_WAIT1),
        (ET_RECVFINACK1, FIN_WAIT1, FIN_WAIT2),
        (ET_RECVFIN1, FIN_WAIT2, TIME_WAIT),
        (ET_TIMEWAITOUT, TIME_WAIT, CLOSED),
        (ET_RECVFIN2, FIN_WAIT1, CLOSING),
        (ET_RECVFINACK2, CLOSING, TIME_WAIT),
        (ET_RECVFIN3, ESTABLISHED, CLOSE_WAIT),
        (ET_SENDFIN3, CLOSE_WAIT, LAST_ACK),
        (ET_RECVFINACK3, LAST_ACK, CLOSED),
    ];
    for (event, from, to) in edges {
        machine.add_event(event, from, to).unwrap();
    }
    machine
}
