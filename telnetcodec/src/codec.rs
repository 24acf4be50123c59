//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

use super::{CodecError, TelnetConfig, TelnetEvent, TelnetFrame, TelnetOption, consts};
use crate::args::TelnetArgument;
use crate::args::environ::{EnvironVariables, process_environment};
use crate::args::linemode::LineModeOption;
use crate::args::naws::WindowSize;
use crate::args::tspeed::TerminalSpeed;
use crate::args::ttype::{self, TerminalTypes};
use crate::event::InputMode;
use crate::frame::put_escaped;
use crate::options::{Negotiated, OptionEffect, OptionTable, TelnetSide};
use bytes::{BufMut, Bytes, BytesMut};
use std::collections::VecDeque;
use tokio_util::codec::{Decoder, Encoder};
use tracing::{debug, info, trace, warn};

/// Raw reply sent for `IAC AYT`.
pub const AYT_REPLY: &[u8] = b"\r\n[otelnet: yes, I'm here]\r\n";

/// Subnegotiation payload beyond this size is discarded until `IAC SE`.
pub const MAX_SUBNEGOTIATION_LEN: usize = 4096;

/// Capabilities offered right after connecting, in order.
const INITIAL_NEGOTIATION: [TelnetFrame; 9] = [
    TelnetFrame::Will(TelnetOption::TransmitBinary),
    TelnetFrame::Will(TelnetOption::SuppressGoAhead),
    TelnetFrame::Do(TelnetOption::SuppressGoAhead),
    TelnetFrame::Do(TelnetOption::Echo),
    TelnetFrame::Will(TelnetOption::TTYPE),
    TelnetFrame::Will(TelnetOption::NAWS),
    TelnetFrame::Will(TelnetOption::TSPEED),
    TelnetFrame::Will(TelnetOption::Environment),
    TelnetFrame::Will(TelnetOption::Linemode),
];

/// The Telnet protocol engine.
///
/// `TelnetCodec` is a pure byte-stream transformer. Incoming wire bytes go through
/// [`TelnetCodec::process_input`], which strips every command and subnegotiation and returns
/// only application data. Negotiation replies produced along the way are not written
/// anywhere; they accumulate in an outbound buffer that the owner drains with
/// [`TelnetCodec::take_output`] and writes to the socket. Option changes are recorded as
/// [`TelnetEvent`]s retrieved with [`TelnetCodec::poll_event`].
///
/// The codec also implements [`Decoder`] (items are payload chunks) and
/// [`Encoder<TelnetFrame>`] so it can sit inside a `tokio_util::codec::Framed`.
///
/// # Example
/// ```
/// use otelnet_telnetcodec::TelnetCodec;
///
/// let mut codec = TelnetCodec::new();
/// let payload = codec.process_input(b"login: \xFF\xFB\x01");
/// assert_eq!(&payload[..], b"login: ");
/// // WILL ECHO was accepted with DO ECHO
/// assert_eq!(codec.take_output().as_deref(), Some(&b"\xFF\xFD\x01"[..]));
/// ```
pub struct TelnetCodec {
    decoder_state: DecoderState,
    subnegotiation: BytesMut,
    options: OptionTable,
    outbound: BytesMut,
    events: VecDeque<TelnetEvent>,
    terminal_types: TerminalTypes,
    terminal_speed: TerminalSpeed,
    environ: EnvironVariables,
    env_lookup: fn(&str) -> Option<String>,
    window_size: WindowSize,
    linemode_active: bool,
    linemode_edit: bool,
    input_mode: InputMode,
}

impl TelnetCodec {
    /// Creates a new instance of `TelnetCodec` with the default configuration.
    pub fn new() -> TelnetCodec {
        TelnetCodec::default()
    }

    /// Creates a codec reporting the values in `config`.
    pub fn with_config(config: TelnetConfig) -> TelnetCodec {
        TelnetCodec {
            decoder_state: DecoderState::Data,
            subnegotiation: BytesMut::new(),
            options: OptionTable::default(),
            outbound: BytesMut::new(),
            events: VecDeque::new(),
            terminal_types: config.terminal_types,
            terminal_speed: config.terminal_speed,
            environ: config.environ,
            env_lookup: process_environment,
            window_size: config.window_size,
            linemode_active: false,
            linemode_edit: false,
            input_mode: InputMode::Line,
        }
    }

    /// Replaces the environment lookup used to answer `ENVIRON SEND`.
    pub fn with_environment(mut self, lookup: fn(&str) -> Option<String>) -> TelnetCodec {
        self.env_lookup = lookup;
        self
    }

    /// Negotiation state for every option.
    pub fn options(&self) -> &OptionTable {
        &self.options
    }

    /// Mutable access to the option table, for adjusting accept policy.
    pub fn options_mut(&mut self) -> &mut OptionTable {
        &mut self.options
    }

    /// Checks if a specific Telnet option is enabled locally.
    pub fn is_enabled_local(&self, option: TelnetOption) -> bool {
        self.options.local_enabled(option)
    }

    /// Checks if a specific Telnet option is enabled on the remote side.
    pub fn is_enabled_remote(&self, option: TelnetOption) -> bool {
        self.options.remote_enabled(option)
    }

    /// Peer transmits in binary; CR is passed through untranslated.
    pub fn binary_remote(&self) -> bool {
        self.options.remote_enabled(TelnetOption::TransmitBinary)
    }

    /// Peer echoes our input, so local echo should be off.
    pub fn remote_echo(&self) -> bool {
        self.options.remote_enabled(TelnetOption::Echo)
    }

    /// LINEMODE was accepted and the peer controls line editing.
    pub fn linemode_active(&self) -> bool {
        self.linemode_active
    }

    /// Last EDIT bit received in a LINEMODE MODE message.
    pub fn linemode_edit(&self) -> bool {
        self.linemode_edit
    }

    /// Current derived input mode.
    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    /// Last window size stored by [`TelnetCodec::update_window_size`].
    pub fn window_size(&self) -> WindowSize {
        self.window_size
    }

    ///
    /// Feeds wire bytes through the protocol state machine and returns the application
    /// payload they carried.
    ///
    /// Never fails. Unknown commands, truncated sequences and refused options are
    /// absorbed, and the state machine stays synchronized across calls, so a command split
    /// over two reads is handled the same as one arriving whole.
    ///
    pub fn process_input(&mut self, input: &[u8]) -> Bytes {
        let mut payload = BytesMut::with_capacity(input.len());
        for &byte in input {
            self.decode_byte(byte, &mut payload);
        }
        payload.freeze()
    }

    /// Doubles every IAC in outgoing application data.
    pub fn prepare_output(data: &[u8]) -> Bytes {
        let mut escaped = BytesMut::with_capacity(data.len());
        put_escaped(&mut escaped, data);
        escaped.freeze()
    }

    /// Queues the client's opening capability offers.
    ///
    /// Offers do not mark anything enabled; state changes only when the peer answers.
    pub fn initial_negotiation(&mut self) {
        for frame in INITIAL_NEGOTIATION {
            self.queue(frame);
        }
    }

    /// Queues `IAC <command> <option>`. Commands other than WILL/WONT/DO/DONT are ignored.
    pub fn send_negotiate(&mut self, command: u8, option: TelnetOption) {
        let frame = match command {
            consts::WILL => TelnetFrame::Will(option),
            consts::WONT => TelnetFrame::Wont(option),
            consts::DO => TelnetFrame::Do(option),
            consts::DONT => TelnetFrame::Dont(option),
            other => {
                warn!("Not a negotiation command: {:#X}", other);
                return;
            }
        };
        self.queue(frame);
    }

    /// Queues `IAC SB <payload> IAC SE` with IAC doubled. An empty payload sends nothing.
    pub fn send_subnegotiation(&mut self, payload: &[u8]) {
        if payload.is_empty() {
            return;
        }
        self.queue(TelnetFrame::Subnegotiate(Bytes::copy_from_slice(payload)));
    }

    ///
    /// Stores the new window size and reports it to the peer.
    ///
    /// A report is queued only when the size actually changed and NAWS is enabled locally.
    /// Returns `true` if a report was queued.
    ///
    pub fn update_window_size(&mut self, size: WindowSize) -> bool {
        if size == self.window_size {
            trace!("Window size unchanged at {size}");
            return false;
        }
        self.window_size = size;
        if !self.options.local_enabled(TelnetOption::NAWS) {
            debug!("Window size now {size}, NAWS not enabled");
            return false;
        }
        self.send_window_size()
    }

    /// Queues a NAWS report of the stored window size.
    pub fn send_window_size(&mut self) -> bool {
        match self.window_size.to_subnegotiation() {
            Ok(payload) => {
                debug!("Reporting window size {}", self.window_size);
                self.queue(TelnetFrame::Subnegotiate(payload));
                true
            }
            Err(error) => {
                warn!("Failed to encode window size: {error}");
                false
            }
        }
    }

    /// True if replies are waiting to be written.
    pub fn has_output(&self) -> bool {
        !self.outbound.is_empty()
    }

    /// Takes every queued byte destined for the wire.
    pub fn take_output(&mut self) -> Option<Bytes> {
        if self.outbound.is_empty() {
            None
        } else {
            Some(self.outbound.split().freeze())
        }
    }

    /// Next recorded event, oldest first.
    pub fn poll_event(&mut self) -> Option<TelnetEvent> {
        self.events.pop_front()
    }

    fn queue(&mut self, frame: TelnetFrame) {
        trace!("Sending {frame}");
        self.outbound.reserve(frame.encoded_len_hint());
        frame.write_to(&mut self.outbound);
    }

    fn decode_byte(&mut self, byte: u8, payload: &mut BytesMut) {
        match (self.decoder_state, byte) {
            (DecoderState::Data, consts::IAC) => {
                self.decoder_state = DecoderState::SeenIac;
            }
            (DecoderState::Data, consts::CR) if !self.binary_remote() => {
                self.decoder_state = DecoderState::SeenCr;
            }
            (DecoderState::Data, _) => {
                payload.put_u8(byte);
            }
            (DecoderState::SeenIac, consts::IAC) => {
                self.decoder_state = DecoderState::Data;
                payload.put_u8(consts::IAC);
            }
            (DecoderState::SeenIac, consts::WILL) => {
                self.decoder_state = DecoderState::SeenWill;
            }
            (DecoderState::SeenIac, consts::WONT) => {
                self.decoder_state = DecoderState::SeenWont;
            }
            (DecoderState::SeenIac, consts::DO) => {
                self.decoder_state = DecoderState::SeenDo;
            }
            (DecoderState::SeenIac, consts::DONT) => {
                self.decoder_state = DecoderState::SeenDont;
            }
            (DecoderState::SeenIac, consts::SB) => {
                self.decoder_state = DecoderState::InSubnegotiation;
                self.subnegotiation.clear();
            }
            (DecoderState::SeenIac, consts::AYT) => {
                self.decoder_state = DecoderState::Data;
                debug!("Answering AYT");
                self.outbound.extend_from_slice(AYT_REPLY);
                self.events.push_back(TelnetEvent::AreYouThere);
            }
            (
                DecoderState::SeenIac,
                consts::GA
                | consts::NOP
                | consts::IP
                | consts::AO
                | consts::BRK
                | consts::EL
                | consts::EC
                | consts::DM
                | consts::EOR,
            ) => {
                self.decoder_state = DecoderState::Data;
                trace!("Ignoring command {:#X}", byte);
            }
            (DecoderState::SeenIac, _) => {
                self.decoder_state = DecoderState::Data;
                debug!("Received Unknown Command {:#X}", byte);
            }
            (DecoderState::SeenWill, _) => {
                self.decoder_state = DecoderState::Data;
                self.negotiate(TelnetFrame::Will(byte.into()));
            }
            (DecoderState::SeenWont, _) => {
                self.decoder_state = DecoderState::Data;
                self.negotiate(TelnetFrame::Wont(byte.into()));
            }
            (DecoderState::SeenDo, _) => {
                self.decoder_state = DecoderState::Data;
                self.negotiate(TelnetFrame::Do(byte.into()));
            }
            (DecoderState::SeenDont, _) => {
                self.decoder_state = DecoderState::Data;
                self.negotiate(TelnetFrame::Dont(byte.into()));
            }
            (DecoderState::InSubnegotiation, consts::IAC) => {
                self.decoder_state = DecoderState::SubnegotiationIac;
            }
            (DecoderState::InSubnegotiation, _) => {
                self.push_subnegotiation(byte);
            }
            (DecoderState::SubnegotiationIac, consts::SE) => {
                self.decoder_state = DecoderState::Data;
                let buffer = self.subnegotiation.split().freeze();
                self.dispatch_subnegotiation(&buffer);
            }
            (DecoderState::SubnegotiationIac, consts::IAC) => {
                self.decoder_state = DecoderState::InSubnegotiation;
                self.push_subnegotiation(consts::IAC);
            }
            (DecoderState::SubnegotiationIac, _) => {
                self.decoder_state = DecoderState::InSubnegotiation;
                debug!("Unexpected {:#X} after IAC inside subnegotiation", byte);
                self.push_subnegotiation(byte);
            }
            (DecoderState::SeenCr, consts::NUL) => {
                self.decoder_state = DecoderState::Data;
                payload.put_u8(consts::CR);
            }
            (DecoderState::SeenCr, consts::LF) => {
                self.decoder_state = DecoderState::Data;
                payload.put_u8(consts::CR);
                payload.put_u8(consts::LF);
            }
            (DecoderState::SeenCr, consts::IAC) => {
                self.decoder_state = DecoderState::SeenIac;
                payload.put_u8(consts::CR);
            }
            (DecoderState::SeenCr, _) => {
                self.decoder_state = DecoderState::Data;
                payload.put_u8(consts::CR);
                payload.put_u8(byte);
            }
        }
    }

    fn push_subnegotiation(&mut self, byte: u8) {
        if self.subnegotiation.len() < MAX_SUBNEGOTIATION_LEN {
            self.subnegotiation.put_u8(byte);
        } else if self.subnegotiation.len() == MAX_SUBNEGOTIATION_LEN {
            // Grow by one so the overflow is only logged once per subnegotiation.
            warn!("Subnegotiation exceeds {} bytes, truncating", MAX_SUBNEGOTIATION_LEN);
            self.subnegotiation.put_u8(byte);
        }
    }

    fn negotiate(&mut self, frame: TelnetFrame) {
        let Some(option) = frame.option() else {
            return;
        };
        let Negotiated { reply, changed } = self.options.handle_received(&frame);
        if let Some(reply) = reply {
            self.queue(reply);
        }
        if let Some((side, enabled)) = changed {
            info!("{side} {option} {}", if enabled { "enabled" } else { "disabled" });
            self.events
                .push_back(TelnetEvent::OptionStatus(option, side, enabled));
            self.apply_effect(option, side, enabled);
            self.update_mode();
        }
    }

    fn apply_effect(&mut self, option: TelnetOption, side: TelnetSide, enabled: bool) {
        match (option.effect(), side, enabled) {
            (OptionEffect::BinaryTransmission, TelnetSide::Remote, false) => {
                warn!("Peer left binary mode; multibyte input may be altered");
            }
            (OptionEffect::RemoteEcho, TelnetSide::Remote, _) => {
                debug!("Remote echo {}", if enabled { "on" } else { "off" });
            }
            (OptionEffect::WindowSizeReport, TelnetSide::Local, true) => {
                self.send_window_size();
            }
            (OptionEffect::LineMode, TelnetSide::Local, enabled) => {
                self.linemode_active = enabled;
                if !enabled {
                    self.linemode_edit = false;
                }
            }
            _ => {}
        }
    }

    fn update_mode(&mut self) {
        let mode = if self.linemode_active {
            if self.linemode_edit {
                InputMode::Line
            } else {
                InputMode::Character
            }
        } else if self.options.remote_enabled(TelnetOption::Echo)
            && self.options.remote_enabled(TelnetOption::SuppressGoAhead)
        {
            InputMode::Character
        } else {
            InputMode::Line
        };
        if mode != self.input_mode {
            info!("Switching to {mode} mode");
            self.input_mode = mode;
            self.events.push_back(TelnetEvent::InputModeChanged(mode));
        }
    }

    fn dispatch_subnegotiation(&mut self, buffer: &[u8]) {
        let Some(argument) = TelnetArgument::parse(buffer) else {
            debug!("Dropping empty subnegotiation");
            return;
        };
        trace!("Received SB {argument}");
        match argument {
            TelnetArgument::TerminalTypeSend => {
                let reply = ttype::is_reply(self.terminal_types.advance());
                self.queue(TelnetFrame::Subnegotiate(reply));
            }
            TelnetArgument::TerminalSpeedSend => {
                let reply = self.terminal_speed.is_reply();
                self.queue(TelnetFrame::Subnegotiate(reply));
            }
            TelnetArgument::EnvironmentSend => match self.environ.is_reply(self.env_lookup) {
                Some(reply) => self.queue(TelnetFrame::Subnegotiate(reply)),
                None => debug!("No environment variables to send"),
            },
            TelnetArgument::LineMode(LineModeOption::Mode { mode }) => {
                let edit_changed = mode.edit != self.linemode_edit;
                self.linemode_edit = mode.edit;
                if mode.ack {
                    let reply = LineModeOption::Mode { mode }.to_subnegotiation();
                    self.queue(TelnetFrame::Subnegotiate(reply));
                }
                if edit_changed {
                    self.update_mode();
                }
            }
            TelnetArgument::LineMode(message) => {
                trace!("Acknowledged LINEMODE {message}");
            }
            TelnetArgument::Unknown(option, _) => {
                debug!("Dropping subnegotiation for {option}");
                self.events
                    .push_back(TelnetEvent::UnhandledSubnegotiation(option));
            }
        }
    }
}

impl Default for TelnetCodec {
    fn default() -> Self {
        TelnetCodec::with_config(TelnetConfig::default())
    }
}

impl std::fmt::Debug for TelnetCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelnetCodec")
            .field("decoder_state", &self.decoder_state)
            .field("options", &self.options)
            .field("input_mode", &self.input_mode)
            .field("window_size", &self.window_size)
            .field("pending_output", &self.outbound.len())
            .finish_non_exhaustive()
    }
}

impl Decoder for TelnetCodec {
    type Item = Bytes;
    type Error = CodecError;

    /// Consumes everything in `src` and yields the application payload, if any.
    /// Negotiation replies are left in the outbound queue.
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Bytes>, Self::Error> {
        if src.is_empty() {
            return Ok(None);
        }
        let input = src.split();
        let payload = self.process_input(&input);
        Ok((!payload.is_empty()).then_some(payload))
    }
}

impl Encoder<TelnetFrame> for TelnetCodec {
    type Error = CodecError;

    fn encode(&mut self, frame: TelnetFrame, dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.reserve(frame.encoded_len_hint());
        frame.write_to(dst);
        Ok(())
    }
}

///
/// Position of the input state machine within the Telnet byte stream.
///
/// Exactly one state is active. It advances on every input byte and has no terminal
/// state: `Data` is both the initial state and where every sequence returns.
///
/// - `Data`: plain application data.
/// - `SeenIac`: an IAC was read; the next byte is a command.
/// - `SeenWill`/`SeenWont`/`SeenDo`/`SeenDont`: the next byte is the option code.
/// - `InSubnegotiation`: collecting `IAC SB` payload bytes.
/// - `SubnegotiationIac`: an IAC arrived inside a subnegotiation; `SE` ends it, `IAC`
///   is an escaped data byte.
/// - `SeenCr`: a CR arrived outside binary mode; the next byte decides what it meant.
///
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum DecoderState {
    Data,
    SeenIac,
    SeenWill,
    SeenWont,
    SeenDo,
    SeenDont,
    InSubnegotiation,
    SubnegotiationIac,
    SeenCr,
}
