//! In-memory line provider that tracks every resource it hands out.
//!
//! Used by the test suite and for dry runs without hardware. Failures can be
//! injected at any acquisition stage and on any write.

use std::cell::RefCell;
use std::fmt;
use std::string::String;
use std::vec::Vec;

use super::provider::{LineDirection, LineProvider};

/// Kind of resource handed out by the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// Open chip handle.
    Chip,
    /// Line settings.
    Settings,
    /// Line configuration.
    LineConfig,
    /// Request descriptor.
    RequestConfig,
    /// Granted line request.
    Request,
}

/// Something that happened to a simulated resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimEvent {
    /// A resource was created.
    Allocated(ResourceKind, u32),
    /// A resource was returned.
    Freed(ResourceKind, u32),
    /// A resource was returned that was not live.
    DoubleFree(ResourceKind, u32),
    /// A line offset was bound into a line configuration.
    Bound(u32),
}

/// Where an injected acquisition failure strikes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    /// Opening the chip.
    OpenChip,
    /// Allocating line settings.
    LineSettings,
    /// Allocating the line configuration.
    LineConfig,
    /// Binding the n-th line (0-based) into a line configuration.
    BindLine(usize),
    /// Allocating the request descriptor.
    RequestConfig,
    /// The final line request.
    RequestLines,
}

/// Errors reported by the simulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// An injected failure fired.
    Injected(FailPoint),
    /// No chip at this path.
    NoSuchChip(String),
    /// Line already claimed by another request.
    Busy(u32),
    /// The n-th write (1-based) was rejected.
    WriteRejected(usize),
    /// The request is not live.
    NotOwned,
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::Injected(point) => write!(f, "injected failure at {:?}", point),
            SimError::NoSuchChip(path) => write!(f, "no such chip: {}", path),
            SimError::Busy(offset) => write!(f, "line {} is busy", offset),
            SimError::WriteRejected(n) => write!(f, "write {} rejected", n),
            SimError::NotOwned => write!(f, "lines not owned"),
        }
    }
}

impl std::error::Error for SimError {}

/// Simulated chip handle.
#[derive(Debug)]
pub struct SimChip {
    id: u32,
    path: String,
}

/// Simulated line settings.
#[derive(Debug)]
pub struct SimSettings {
    id: u32,
    direction: LineDirection,
}

/// Simulated line configuration.
#[derive(Debug)]
pub struct SimLineConfig {
    id: u32,
    lines: Vec<(u32, LineDirection)>,
}

/// Simulated request descriptor.
#[derive(Debug)]
pub struct SimRequestConfig {
    id: u32,
    consumer: String,
}

/// Simulated line request. Owns its chip.
#[derive(Debug)]
pub struct SimRequest {
    id: u32,
    chip: SimChip,
    offsets: Vec<u32>,
}

impl SimRequest {
    /// Path of the chip the lines belong to.
    pub fn chip_path(&self) -> &str {
        &self.chip.path
    }

    /// Requested offsets in configuration order.
    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }
}

#[derive(Debug, Default)]
struct SimState {
    next_id: u32,
    live: Vec<(ResourceKind, u32)>,
    events: Vec<SimEvent>,
    claimed: Vec<(u32, String)>,
    missing_chips: Vec<String>,
    fail_at: Option<FailPoint>,
    fail_write: Option<usize>,
    write_attempts: usize,
    writes: Vec<[bool; 4]>,
}

impl SimState {
    fn allocate(&mut self, kind: ResourceKind) -> u32 {
        self.next_id += 1;
        let id = self.next_id;
        self.live.push((kind, id));
        self.events.push(SimEvent::Allocated(kind, id));
        id
    }

    fn free(&mut self, kind: ResourceKind, id: u32) {
        match self.live.iter().position(|&entry| entry == (kind, id)) {
            Some(pos) => {
                self.live.remove(pos);
                self.events.push(SimEvent::Freed(kind, id));
            }
            None => self.events.push(SimEvent::DoubleFree(kind, id)),
        }
    }

    /// Fire the injected failure if it matches, consuming it.
    fn trip(&mut self, point: FailPoint) -> Result<(), SimError> {
        if self.fail_at == Some(point) {
            self.fail_at = None;
            return Err(SimError::Injected(point));
        }
        Ok(())
    }
}

/// Resource-tracking in-memory [`LineProvider`].
///
/// Injected failures are one-shot: they fire once and then clear.
#[derive(Debug, Default)]
pub struct SimProvider {
    state: RefCell<SimState>,
}

impl SimProvider {
    /// Create a simulator where every chip path opens.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next acquisition step matching `point`.
    pub fn fail_at(&self, point: FailPoint) {
        self.state.borrow_mut().fail_at = Some(point);
    }

    /// Reject the n-th write (1-based, counted over the simulator's lifetime).
    pub fn fail_write(&self, n: usize) {
        self.state.borrow_mut().fail_write = Some(n);
    }

    /// Make opening `path` fail as if the device did not exist.
    pub fn remove_chip(&self, path: &str) {
        self.state.borrow_mut().missing_chips.push(path.into());
    }

    /// Resources currently allocated.
    pub fn live(&self) -> Vec<(ResourceKind, u32)> {
        self.state.borrow().live.clone()
    }

    /// Number of resources currently allocated.
    pub fn live_count(&self) -> usize {
        self.state.borrow().live.len()
    }

    /// Every event so far, in order.
    pub fn events(&self) -> Vec<SimEvent> {
        self.state.borrow().events.clone()
    }

    /// Kinds of the resources freed so far, in order.
    pub fn freed(&self) -> Vec<ResourceKind> {
        self.state
            .borrow()
            .events
            .iter()
            .filter_map(|event| match event {
                SimEvent::Freed(kind, _) => Some(*kind),
                _ => None,
            })
            .collect()
    }

    /// Offsets bound into line configurations so far, in order.
    pub fn bound(&self) -> Vec<u32> {
        self.state
            .borrow()
            .events
            .iter()
            .filter_map(|event| match event {
                SimEvent::Bound(offset) => Some(*offset),
                _ => None,
            })
            .collect()
    }

    /// Successful writes so far, in order.
    pub fn writes(&self) -> Vec<[bool; 4]> {
        self.state.borrow().writes.clone()
    }

    /// Lines currently claimed, with the consumer holding each.
    pub fn claimed(&self) -> Vec<(u32, String)> {
        self.state.borrow().claimed.clone()
    }
}

impl LineProvider for SimProvider {
    type Error = SimError;
    type Chip = SimChip;
    type Settings = SimSettings;
    type LineConfig = SimLineConfig;
    type RequestConfig = SimRequestConfig;
    type Request = SimRequest;

    fn open_chip(&self, path: &str) -> Result<SimChip, SimError> {
        let mut state = self.state.borrow_mut();
        state.trip(FailPoint::OpenChip)?;
        if state.missing_chips.iter().any(|missing| missing == path) {
            return Err(SimError::NoSuchChip(path.into()));
        }
        let id = state.allocate(ResourceKind::Chip);
        Ok(SimChip {
            id,
            path: path.into(),
        })
    }

    fn close_chip(&self, chip: SimChip) {
        self.state.borrow_mut().free(ResourceKind::Chip, chip.id);
    }

    fn new_line_settings(&self, direction: LineDirection) -> Result<SimSettings, SimError> {
        let mut state = self.state.borrow_mut();
        state.trip(FailPoint::LineSettings)?;
        let id = state.allocate(ResourceKind::Settings);
        Ok(SimSettings { id, direction })
    }

    fn free_line_settings(&self, settings: SimSettings) {
        self.state
            .borrow_mut()
            .free(ResourceKind::Settings, settings.id);
    }

    fn new_line_config(&self) -> Result<SimLineConfig, SimError> {
        let mut state = self.state.borrow_mut();
        state.trip(FailPoint::LineConfig)?;
        let id = state.allocate(ResourceKind::LineConfig);
        Ok(SimLineConfig {
            id,
            lines: Vec::new(),
        })
    }

    fn add_line_settings(
        &self,
        config: &mut SimLineConfig,
        offset: u32,
        settings: &SimSettings,
    ) -> Result<(), SimError> {
        let mut state = self.state.borrow_mut();
        state.events.push(SimEvent::Bound(offset));
        state.trip(FailPoint::BindLine(config.lines.len()))?;
        config.lines.push((offset, settings.direction));
        Ok(())
    }

    fn free_line_config(&self, config: SimLineConfig) {
        self.state
            .borrow_mut()
            .free(ResourceKind::LineConfig, config.id);
    }

    fn new_request_config(&self, consumer: &str) -> Result<SimRequestConfig, SimError> {
        let mut state = self.state.borrow_mut();
        state.trip(FailPoint::RequestConfig)?;
        let id = state.allocate(ResourceKind::RequestConfig);
        Ok(SimRequestConfig {
            id,
            consumer: consumer.into(),
        })
    }

    fn free_request_config(&self, config: SimRequestConfig) {
        self.state
            .borrow_mut()
            .free(ResourceKind::RequestConfig, config.id);
    }

    fn request_lines(
        &self,
        chip: SimChip,
        request: &SimRequestConfig,
        lines: &SimLineConfig,
    ) -> Result<SimRequest, (SimChip, SimError)> {
        let mut state = self.state.borrow_mut();
        if let Err(e) = state.trip(FailPoint::RequestLines) {
            return Err((chip, e));
        }

        let busy = lines
            .lines
            .iter()
            .find(|(offset, _)| state.claimed.iter().any(|(held, _)| held == offset));
        if let Some(&(offset, _)) = busy {
            return Err((chip, SimError::Busy(offset)));
        }

        let offsets: Vec<u32> = lines.lines.iter().map(|&(offset, _)| offset).collect();
        for &offset in &offsets {
            state.claimed.push((offset, request.consumer.clone()));
        }

        let id = state.allocate(ResourceKind::Request);
        Ok(SimRequest { id, chip, offsets })
    }

    fn set_values(&self, request: &SimRequest, values: &[bool; 4]) -> Result<(), SimError> {
        let mut state = self.state.borrow_mut();
        state.write_attempts += 1;

        let attempt = state.write_attempts;
        if state.fail_write == Some(attempt) {
            state.fail_write = None;
            return Err(SimError::WriteRejected(attempt));
        }

        if !state.live.contains(&(ResourceKind::Request, request.id)) {
            return Err(SimError::NotOwned);
        }

        state.writes.push(*values);
        Ok(())
    }

    fn release(&self, request: SimRequest) {
        let mut state = self.state.borrow_mut();
        state
            .claimed
            .retain(|(offset, _)| !request.offsets.contains(offset));
        state.free(ResourceKind::Request, request.id);
        state.free(ResourceKind::Chip, request.chip.id);
    }
}
