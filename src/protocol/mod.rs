//! The protocol engine: drives the connection handshake and the
//! steady-state dispatch loop, routing incoming messages to the right
//! per-interface handler by looking up the target object's kind in the
//! object registry.

pub mod callback;
pub mod display;
pub mod keyboard;
pub mod registry;
pub mod seat;

use std::collections::VecDeque;
use std::os::fd::RawFd;

use crate::error::MonitorError;
use crate::keymap::KeymapDecoder;
use crate::layout::LayoutTracker;
use crate::registry::{ObjectKind, ObjectRegistry, DISPLAY_ID};
use crate::transport::SocketTransport;
use crate::wire::{MessageFramer, WlMessage};

const SEAT_INTERFACE: &str = "wl_seat";
const MAX_SEAT_VERSION: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EngineState {
    Disconnected,
    Running,
    Closed,
}

pub struct ProtocolEngine<F: FnMut(&str)> {
    transport: Option<SocketTransport>,
    framer: MessageFramer,
    objects: ObjectRegistry,
    fd_queue: VecDeque<RawFd>,
    keymap_decoder: KeymapDecoder,
    layout: LayoutTracker<F>,
    state: EngineState,

    registry_id: u32,
    seat_global_name: Option<u32>,
    seat_global_version: u32,
    seat_id: Option<u32>,
    keyboard_id: Option<u32>,
}

impl<F: FnMut(&str)> ProtocolEngine<F> {
    pub fn new(on_layout_change: F) -> Self {
        Self {
            transport: None,
            framer: MessageFramer::new(),
            objects: ObjectRegistry::new(),
            fd_queue: VecDeque::new(),
            keymap_decoder: KeymapDecoder::new(),
            layout: LayoutTracker::new(on_layout_change),
            state: EngineState::Disconnected,
            registry_id: 0,
            seat_global_name: None,
            seat_global_version: 0,
            seat_id: None,
            keyboard_id: None,
        }
    }

    /// Runs the connection handshake: requests the registry, performs a
    /// blocking roundtrip to enumerate globals, binds `wl_seat` if one was
    /// advertised, then a second blocking roundtrip so its capabilities
    /// (and therefore the keyboard) are bound too, before returning to
    /// non-blocking steady state. Returns the socket fd for the caller's
    /// event loop.
    pub fn connect(&mut self) -> Result<RawFd, MonitorError> {
        let transport = SocketTransport::connect()?;
        self.transport = Some(transport);

        self.registry_id = self.objects.alloc(ObjectKind::Registry);
        self.send(display::request::get_registry(DISPLAY_ID, self.registry_id))?;

        self.roundtrip()?;

        if let Some(name) = self.seat_global_name {
            let seat_id = self.objects.alloc(ObjectKind::Seat);
            self.seat_id = Some(seat_id);
            let version = self.seat_global_version.min(MAX_SEAT_VERSION);
            self.send(registry::request::bind(
                self.registry_id,
                name,
                SEAT_INTERFACE,
                version,
                seat_id,
            ))?;
            log::info!("bound wl_seat as object {seat_id}");

            self.roundtrip()?;
        }

        let fd = self.transport.as_ref().expect("just connected").fd();
        self.transport
            .as_ref()
            .expect("just connected")
            .set_blocking(false)?;
        self.state = EngineState::Running;
        Ok(fd)
    }

    /// Sends a `wl_display.sync` and blocks, dispatching events, until its
    /// `done` fires.
    fn roundtrip(&mut self) -> Result<(), MonitorError> {
        let callback_id = self.objects.alloc(ObjectKind::Callback);
        self.send(display::request::sync(DISPLAY_ID, callback_id))?;

        self.transport
            .as_ref()
            .expect("connected")
            .set_blocking(true)?;
        loop {
            self.receive_and_buffer()?;
            let mut done = false;
            while let Some(msg) = self.framer.next()? {
                if msg.object_id == callback_id {
                    done = true;
                    self.objects.forget(callback_id);
                    continue;
                }
                self.handle_message(msg)?;
            }
            if done {
                return Ok(());
            }
        }
    }

    /// Non-blocking drain of whatever is currently available on the socket.
    pub fn dispatch(&mut self) -> Result<(), MonitorError> {
        self.receive_and_buffer()?;
        while let Some(msg) = self.framer.next()? {
            self.handle_message(msg)?;
        }
        Ok(())
    }

    pub fn disconnect(&mut self) {
        self.transport = None;
        self.state = EngineState::Closed;
    }

    fn send(&mut self, msg: WlMessage) -> Result<(), MonitorError> {
        let transport = self.transport.as_mut().expect("connected");
        transport.send(&msg.encode(), &[])
    }

    fn receive_and_buffer(&mut self) -> Result<(), MonitorError> {
        let transport = self.transport.as_mut().expect("connected");
        let (bytes, fds) = transport.receive()?;
        self.framer.push(&bytes);
        self.fd_queue.extend(fds);
        Ok(())
    }

    fn handle_message(&mut self, msg: WlMessage) -> Result<(), MonitorError> {
        match self.objects.kind_of(msg.object_id) {
            Some(ObjectKind::Display) => self.handle_display_event(msg),
            Some(ObjectKind::Registry) => self.handle_registry_event(msg),
            Some(ObjectKind::Seat) => self.handle_seat_event(msg),
            Some(ObjectKind::Keyboard) => self.handle_keyboard_event(msg),
            Some(ObjectKind::Callback) => {
                // A stale callback whose `done` we already consumed in a
                // prior roundtrip; nothing left to do with it.
                Ok(())
            }
            None => {
                log::debug!("dropping event for unknown object {}", msg.object_id);
                Ok(())
            }
        }
    }

    fn handle_display_event(&mut self, msg: WlMessage) -> Result<(), MonitorError> {
        match msg.opcode {
            display::event::error::OPCODE => {
                let event = display::event::Error::parse(&msg.payload)?;
                log::error!(
                    "compositor error on object {}: code {} - {}",
                    event.object_id,
                    event.code,
                    event.message
                );
            }
            display::event::delete_id::OPCODE => {
                let event = display::event::DeleteId::parse(&msg.payload)?;
                self.objects.forget(event.id);
            }
            other => log::debug!("unhandled wl_display opcode {other}"),
        }
        Ok(())
    }

    fn handle_registry_event(&mut self, msg: WlMessage) -> Result<(), MonitorError> {
        match msg.opcode {
            registry::event::global::OPCODE => {
                let event = registry::event::Global::parse(&msg.payload)?;
                if event.interface == SEAT_INTERFACE {
                    log::info!(
                        "found wl_seat: name={} version={}",
                        event.name,
                        event.version
                    );
                    self.seat_global_name = Some(event.name);
                    self.seat_global_version = event.version;
                }
            }
            registry::event::global_remove::OPCODE => {
                let event = registry::event::GlobalRemove::parse(&msg.payload)?;
                if self.seat_global_name == Some(event.name) {
                    log::warn!("wl_seat global {} was removed", event.name);
                }
            }
            other => log::debug!("unhandled wl_registry opcode {other}"),
        }
        Ok(())
    }

    fn handle_seat_event(&mut self, msg: WlMessage) -> Result<(), MonitorError> {
        match msg.opcode {
            seat::event::capabilities::OPCODE => {
                let event = seat::event::Capabilities::parse(&msg.payload)?;
                if event.has_keyboard() && self.keyboard_id.is_none() {
                    let keyboard_id = self.objects.alloc(ObjectKind::Keyboard);
                    self.keyboard_id = Some(keyboard_id);
                    let seat_id = self.seat_id.expect("seat bound before its events arrive");
                    self.send(seat::request::get_keyboard(seat_id, keyboard_id))?;
                    log::info!("created wl_keyboard as object {keyboard_id}");
                }
            }
            seat::event::name::OPCODE => {
                let event = seat::event::Name::parse(&msg.payload)?;
                log::info!("seat name: {}", event.name);
            }
            other => log::debug!("unhandled wl_seat opcode {other}"),
        }
        Ok(())
    }

    fn handle_keyboard_event(&mut self, msg: WlMessage) -> Result<(), MonitorError> {
        use keyboard::event as kb_event;
        match msg.opcode {
            kb_event::keymap::OPCODE => {
                let event = kb_event::Keymap::parse(&msg.payload)?;
                let fd = self.fd_queue.pop_front();
                match fd {
                    Some(fd) => match self.keymap_decoder.decode(event.format, fd, event.size) {
                        Ok(layouts) => {
                            log::info!("keymap layouts: {layouts:?}");
                            self.layout.on_keymap(layouts);
                        }
                        Err(MonitorError::KeymapUnsupported(format)) => {
                            log::warn!("unsupported keymap format {format}, expected XKB_V1")
                        }
                        Err(err) => log::error!("failed to decode keymap: {err}"),
                    },
                    None => log::warn!("no fd received for keymap event"),
                }
            }
            kb_event::modifiers::OPCODE => {
                let event = kb_event::Modifiers::parse(&msg.payload)?;
                self.layout.on_modifiers(event.group);
            }
            kb_event::enter::OPCODE
            | kb_event::leave::OPCODE
            | kb_event::key::OPCODE
            | kb_event::repeat_info::OPCODE => {}
            other => log::debug!("unhandled wl_keyboard opcode {other}"),
        }
        Ok(())
    }

    pub fn layout_names(&self) -> &[String] {
        &self.layout.state().layouts
    }

    pub fn current_group(&self) -> u32 {
        self.layout.state().group
    }
}
