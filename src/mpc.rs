//! Akai MPC Studio driver
//!
//! Opens the device's input and output ports and the host-facing virtual
//! output, and turns the midir input callback into a channel of events
//! consumed by a single task.

pub mod animation;
pub mod events;
pub mod lights;
pub mod pads;

pub use animation::{Frame, StartupAnimation};
pub use events::{classify, Event};
pub use lights::{encode_button_color, encode_pad_color, PadColor};
pub use pads::{note_to_pad, pad_to_note, PadIndex, PAD_COUNT, PAD_NOTES};

use anyhow::{anyhow, Context, Result};
use midir::{MidiInput, MidiInputConnection, MidiOutput, MidiOutputConnection};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::MidiConfig;
use crate::midi::{find_port, format_hex};

/// Capacity of the inbound event channel
const EVENT_CHANNEL_CAPACITY: usize = 1000;

/// MIDI message received from the device
#[derive(Debug, Clone)]
pub struct MpcEvent {
    /// Driver timestamp in microseconds
    pub timestamp: u64,
    pub raw_data: Vec<u8>,
}

/// Open connections to the device and the host
pub struct MpcDriver {
    input_conn: Option<MidiInputConnection<()>>,
    event_rx: Option<mpsc::Receiver<MpcEvent>>,
    device_out: Option<MidiOutputConnection>,
    host_out: Option<MidiOutputConnection>,
}

impl MpcDriver {
    /// Connect to the device ports and open the virtual host output
    ///
    /// Fails if the device cannot be found by name.
    pub fn connect(config: &MidiConfig) -> Result<Self> {
        info!(
            "Connecting to '{}' (virtual output '{}')",
            config.device_port, config.virtual_port
        );

        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

        let midi_in = MidiInput::new(&format!("{} In", config.client_name))
            .context("Failed to create MIDI input")?;
        let (in_port, in_name) = find_port(&midi_in, &config.device_port)
            .ok_or_else(|| anyhow!("Could not find {} input port", config.device_port))?;

        let midi_out = MidiOutput::new(&format!("{} Out", config.client_name))
            .context("Failed to create MIDI output")?;
        let (out_port, out_name) = find_port(&midi_out, &config.device_port)
            .ok_or_else(|| anyhow!("Could not find {} output port", config.device_port))?;

        info!("Found device ports: in='{}', out='{}'", in_name, out_name);

        let input_conn = midi_in
            .connect(
                &in_port,
                "mpc-studio-bridge",
                move |timestamp, data, _| {
                    let event = MpcEvent {
                        timestamp,
                        raw_data: data.to_vec(),
                    };
                    if let Err(e) = event_tx.try_send(event) {
                        warn!("Dropping device message {}: {}", format_hex(data), e);
                    }
                },
                (),
            )
            .map_err(|e| anyhow!("Failed to connect to input port '{}': {}", in_name, e))?;

        let device_out = midi_out
            .connect(&out_port, "mpc-studio-bridge")
            .map_err(|e| anyhow!("Failed to connect to output port '{}': {}", out_name, e))?;

        let host_out = open_host_output(config)?;

        Ok(Self {
            input_conn: Some(input_conn),
            event_rx: Some(event_rx),
            device_out: Some(device_out),
            host_out: Some(host_out),
        })
    }

    /// Take the event receiver (for the main loop to consume)
    pub fn take_event_receiver(&mut self) -> Option<mpsc::Receiver<MpcEvent>> {
        self.event_rx.take()
    }

    /// Take both outputs, device first
    pub fn take_outputs(&mut self) -> Option<(MidiOutputConnection, MidiOutputConnection)> {
        Some((self.device_out.take()?, self.host_out.take()?))
    }

    /// Stop receiving device input
    pub fn disconnect(&mut self) {
        if let Some(conn) = self.input_conn.take() {
            conn.close();
        }
        self.device_out = None;
        self.host_out = None;
        info!("MPC Studio disconnected");
    }
}

#[cfg(unix)]
fn open_host_output(config: &MidiConfig) -> Result<MidiOutputConnection> {
    use midir::os::unix::VirtualOutput;

    let midi_out = MidiOutput::new(&config.client_name).context("Failed to create MIDI output")?;
    let conn = midi_out
        .create_virtual(&config.virtual_port)
        .map_err(|e| anyhow!("Couldn't create virtual output '{}': {}", config.virtual_port, e))?;

    debug!("Virtual output '{}' opened", config.virtual_port);
    Ok(conn)
}

/// Without virtual ports, connect to an existing loopback port (e.g. loopMIDI)
#[cfg(not(unix))]
fn open_host_output(config: &MidiConfig) -> Result<MidiOutputConnection> {
    let midi_out = MidiOutput::new(&config.client_name).context("Failed to create MIDI output")?;
    let (port, name) = find_port(&midi_out, &config.virtual_port).ok_or_else(|| {
        anyhow!(
            "Loopback port '{}' not found (virtual ports are unavailable on this platform)",
            config.virtual_port
        )
    })?;

    let conn = midi_out
        .connect(&port, "mpc-studio-bridge")
        .map_err(|e| anyhow!("Failed to connect to host port '{}': {}", name, e))?;

    debug!("Host output connected to '{}'", name);
    Ok(conn)
}
