//! MIDI transport utilities
//!
//! Port discovery by name, the output sink traits the router writes through,
//! and hex formatting for logs.

use anyhow::{Context, Result};
use colored::*;
use midir::{MidiInput, MidiOutput, MidiOutputConnection};
use tracing::debug;

/// Physical device output (LED commands)
pub trait DeviceSink: Send {
    fn send(&mut self, bytes: &[u8]) -> Result<()>;
}

/// Host-facing output (forwarded performance data)
pub trait HostSink: Send {
    fn forward(&mut self, bytes: &[u8]) -> Result<()>;
}

impl DeviceSink for MidiOutputConnection {
    fn send(&mut self, bytes: &[u8]) -> Result<()> {
        MidiOutputConnection::send(self, bytes).context("Failed to send MIDI to device")?;
        Ok(())
    }
}

impl HostSink for MidiOutputConnection {
    fn forward(&mut self, bytes: &[u8]) -> Result<()> {
        MidiOutputConnection::send(self, bytes).context("Failed to forward MIDI to host")?;
        Ok(())
    }
}

/// Find a port by name: exact match first, then case-insensitive substring
pub fn find_port<T: midir::MidiIO>(midi_io: &T, pattern: &str) -> Option<(T::Port, String)> {
    let named: Vec<(T::Port, String)> = midi_io
        .ports()
        .into_iter()
        .filter_map(|port| midi_io.port_name(&port).ok().map(|name| (port, name)))
        .collect();

    let index = match_port_name(named.iter().map(|(_, name)| name.as_str()), pattern)?;
    let (port, name) = named.into_iter().nth(index)?;
    debug!("Found port '{}' matching pattern '{}'", name, pattern);
    Some((port, name))
}

/// Index of the best name match: exact first, then case-insensitive substring
pub fn match_port_name<'a>(names: impl Iterator<Item = &'a str> + Clone, pattern: &str) -> Option<usize> {
    if let Some(idx) = names.clone().position(|name| name == pattern) {
        return Some(idx);
    }

    let pattern = pattern.to_lowercase();
    names.into_iter().position(|name| name.to_lowercase().contains(&pattern))
}

/// List available MIDI input port names
pub fn list_input_ports(client_name: &str) -> Result<Vec<String>> {
    let midi_in = MidiInput::new(client_name).context("Failed to create MIDI input")?;
    Ok(midi_in
        .ports()
        .iter()
        .filter_map(|port| midi_in.port_name(port).ok())
        .collect())
}

/// List available MIDI output port names
pub fn list_output_ports(client_name: &str) -> Result<Vec<String>> {
    let midi_out = MidiOutput::new(client_name).context("Failed to create MIDI output")?;
    Ok(midi_out
        .ports()
        .iter()
        .filter_map(|port| midi_out.port_name(port).ok())
        .collect())
}

/// Print discovered ports, highlighting those matching the device name
pub fn print_ports(client_name: &str, device_port: &str) -> Result<()> {
    let inputs = list_input_ports(client_name)?;
    let outputs = list_output_ports(client_name)?;

    let print_list = |title: &str, names: &[String]| {
        println!("\n{}", title.bold().cyan());
        let best = match_port_name(names.iter().map(String::as_str), device_port);
        for (i, name) in names.iter().enumerate() {
            if Some(i) == best {
                println!("  {}: {} {}", i, name.green(), "[device]".yellow());
            } else {
                println!("  {}: {}", i, name);
            }
        }
        if names.is_empty() {
            println!("  {}", "(none)".dimmed());
        }
    };

    print_list("=== MIDI Input Ports ===", &inputs);
    print_list("=== MIDI Output Ports ===", &outputs);
    println!();

    Ok(())
}

/// Format MIDI bytes as hex string for debugging
pub fn format_hex(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
