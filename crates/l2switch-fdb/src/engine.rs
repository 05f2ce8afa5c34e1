//! Forwarding decisions for received frames.

use crate::config::SwitchConfig;
use crate::error::{Result, SwitchError};
use crate::frame::EthernetHeader;
use crate::stats::{SwitchStats, SwitchStatsSnapshot};
use crate::table::{AddressTable, AddressTableEntry, LearnOutcome, Timestamp};
use l2switch_types::{InterfaceNumber, MacAddress};
use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, warn};

/// Capability to hand a frame to the transport for one outbound interface.
///
/// Implementations must not block; the engine calls `emit` while processing
/// a frame and expects it to return promptly.
pub trait FrameSink {
    fn emit(&mut self, interface: InterfaceNumber, frame: &[u8]);
}

impl<F> FrameSink for F
where
    F: FnMut(InterfaceNumber, &[u8]),
{
    fn emit(&mut self, interface: InterfaceNumber, frame: &[u8]) {
        self(interface, frame)
    }
}

/// Per-interface identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interface {
    pub number: InterfaceNumber,
    /// MAC address announced for this interface; zero until announced.
    pub mac: MacAddress,
}

impl Interface {
    fn new(number: InterfaceNumber) -> Self {
        Self {
            number,
            mac: MacAddress::ZERO,
        }
    }
}

/// Reply to a control channel command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAck {
    /// The command was received and not acted on.
    Ignored,
}

/// Outcome of processing one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardDecision {
    /// Destination known on another interface.
    Unicast(InterfaceNumber),
    /// Broadcast or unknown destination; sent everywhere but the arrival interface.
    Flood(Vec<InterfaceNumber>),
    /// Destination known on the arrival interface; nothing sent.
    Filtered(InterfaceNumber),
    /// Frame shorter than an Ethernet header; dropped before learning.
    Malformed { len: usize },
}

impl ForwardDecision {
    /// Interfaces the frame was emitted on, in increasing order.
    pub fn targets(&self) -> &[InterfaceNumber] {
        match self {
            ForwardDecision::Unicast(target) => std::slice::from_ref(target),
            ForwardDecision::Flood(targets) => targets,
            ForwardDecision::Filtered(_) | ForwardDecision::Malformed { .. } => &[],
        }
    }
}

/// Learning switch forwarding engine.
///
/// All state that survives between frames lives in the address table and the
/// interface identity array. Each [`handle_frame`](Self::handle_frame) call
/// validates, learns, decides and emits without suspending in between.
pub struct ForwardingEngine {
    config: SwitchConfig,
    table: Mutex<AddressTable>,
    interfaces: RwLock<Vec<Interface>>,
    stats: SwitchStats,
}

impl ForwardingEngine {
    /// Creates an engine with an empty address table.
    pub fn new(config: SwitchConfig) -> Result<Self> {
        config.validate()?;

        let interfaces = (0..config.interface_count)
            .filter_map(InterfaceNumber::from_index)
            .map(Interface::new)
            .collect();

        Ok(Self {
            table: Mutex::new(AddressTable::new(config.capacity)),
            interfaces: RwLock::new(interfaces),
            stats: SwitchStats::default(),
            config,
        })
    }

    pub fn config(&self) -> &SwitchConfig {
        &self.config
    }

    fn check_interface(&self, interface: InterfaceNumber) -> Result<()> {
        if interface.index() < self.config.interface_count {
            Ok(())
        } else {
            Err(SwitchError::UnknownInterface {
                interface: interface.get(),
                interface_count: self.config.interface_count,
            })
        }
    }

    /// Processes `frame` received on `arrival` and emits it to the chosen
    /// interfaces through `sink`.
    ///
    /// A frame shorter than an Ethernet header is logged and dropped; that is
    /// reported as [`ForwardDecision::Malformed`], not as an error.
    ///
    /// # Errors
    ///
    /// Returns [`SwitchError::UnknownInterface`] if `arrival` is not one of
    /// the configured interfaces. Nothing is learned or emitted in that case.
    pub fn handle_frame<S>(
        &self,
        arrival: InterfaceNumber,
        frame: &[u8],
        now: Timestamp,
        sink: &mut S,
    ) -> Result<ForwardDecision>
    where
        S: FrameSink + ?Sized,
    {
        self.check_interface(arrival)?;
        SwitchStats::bump(&self.stats.frames_received);

        let header = match EthernetHeader::parse(frame) {
            Ok(header) => header,
            Err(e) => {
                warn!(interface = %arrival, error = %e, "Dropping malformed frame");
                SwitchStats::bump(&self.stats.frames_malformed);
                return Ok(ForwardDecision::Malformed { len: frame.len() });
            }
        };

        let decision = {
            let mut table = self.table.lock();
            if !header.src.is_broadcast() {
                let outcome = table.learn(header.src, arrival, now);
                self.record_learn(header.src, arrival, outcome);
            }
            self.decide(&table, arrival, &header.dst)
        };

        match &decision {
            ForwardDecision::Unicast(_) => SwitchStats::bump(&self.stats.frames_unicast),
            ForwardDecision::Flood(_) => SwitchStats::bump(&self.stats.frames_flooded),
            ForwardDecision::Filtered(_) => {
                debug!(from = %arrival, dst = %header.dst, "Frame dropped, destination is on the arrival interface");
                SwitchStats::bump(&self.stats.frames_filtered);
            }
            ForwardDecision::Malformed { .. } => {}
        }

        for &target in decision.targets() {
            debug!(from = %arrival, to = %target, "Frame forwarded");
            sink.emit(target, frame);
        }
        SwitchStats::add(&self.stats.emissions, decision.targets().len() as u64);

        Ok(decision)
    }

    fn decide(
        &self,
        table: &AddressTable,
        arrival: InterfaceNumber,
        dst: &MacAddress,
    ) -> ForwardDecision {
        if dst.is_broadcast() {
            return self.flood(arrival);
        }

        match table.lookup(dst) {
            Some(target) if target == arrival => ForwardDecision::Filtered(target),
            Some(target) => ForwardDecision::Unicast(target),
            None => self.flood(arrival),
        }
    }

    fn flood(&self, arrival: InterfaceNumber) -> ForwardDecision {
        let targets = (0..self.config.interface_count)
            .filter_map(InterfaceNumber::from_index)
            .filter(|&target| target != arrival)
            .collect();
        ForwardDecision::Flood(targets)
    }

    fn record_learn(&self, mac: MacAddress, interface: InterfaceNumber, outcome: LearnOutcome) {
        match outcome {
            LearnOutcome::Inserted => {
                debug!(%mac, %interface, "Learned new address");
                SwitchStats::bump(&self.stats.entries_inserted);
            }
            LearnOutcome::Refreshed => SwitchStats::bump(&self.stats.entries_refreshed),
            LearnOutcome::Moved { from } => {
                debug!(%mac, %from, to = %interface, "Address moved");
                SwitchStats::bump(&self.stats.entries_moved);
            }
            LearnOutcome::Evicted { victim } => {
                debug!(
                    %mac,
                    %interface,
                    evicted = %victim.mac,
                    evicted_interface = %victim.interface,
                    "Learned address, evicted oldest entry"
                );
                SwitchStats::bump(&self.stats.entries_evicted);
            }
        }
    }

    /// Records the MAC identity of `interface`.
    ///
    /// The identity is kept for reference only; forwarding never consults it.
    pub fn announce_mac(&self, interface: InterfaceNumber, mac: MacAddress) -> Result<()> {
        self.check_interface(interface)?;
        self.interfaces.write()[interface.index()].mac = mac;
        info!(%interface, %mac, "Interface MAC announced");
        Ok(())
    }

    /// Returns the MAC identity announced for `interface`.
    pub fn interface_mac(&self, interface: InterfaceNumber) -> Result<MacAddress> {
        self.check_interface(interface)?;
        Ok(self.interfaces.read()[interface.index()].mac)
    }

    /// Returns a copy of every interface identity.
    pub fn interfaces(&self) -> Vec<Interface> {
        self.interfaces.read().clone()
    }

    /// Accepts a control channel command. Commands are acknowledged and ignored.
    pub fn dispatch_control(&self, command: &str) -> ControlAck {
        SwitchStats::bump(&self.stats.control_commands);
        info!("Received command `{}' (ignored)", command);
        ControlAck::Ignored
    }

    /// Returns the interface `mac` was learned on.
    pub fn lookup(&self, mac: &MacAddress) -> Option<InterfaceNumber> {
        self.table.lock().lookup(mac)
    }

    /// Returns a copy of the address table in slot order.
    pub fn table_snapshot(&self) -> Vec<AddressTableEntry> {
        self.table.lock().entries().to_vec()
    }

    /// Returns the number of learned addresses.
    pub fn table_len(&self) -> usize {
        self.table.lock().len()
    }

    pub fn stats(&self) -> SwitchStatsSnapshot {
        self.stats.snapshot()
    }
}
