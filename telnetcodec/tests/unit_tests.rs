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

//! Unit tests for telnetcodec components

use otelnet_telnetcodec::naws::WindowSize;
use otelnet_telnetcodec::{TelnetCodec, TelnetEvent, TelnetOption, TelnetSide, consts};
use proptest::prelude::*;

// ============================================================================
// Helper Functions
// ============================================================================

fn drain_output(codec: &mut TelnetCodec) -> Vec<u8> {
    codec.take_output().map(|b| b.to_vec()).unwrap_or_default()
}

fn drain_events(codec: &mut TelnetCodec) -> Vec<TelnetEvent> {
    let mut events = Vec::new();
    while let Some(event) = codec.poll_event() {
        events.push(event);
    }
    events
}

/// Arbitrary data without IAC or CR. A CR is held back until the byte after it
/// arrives, and `CR NUL` collapses to CR, so neither survives a plain round trip.
fn plain_data() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec((0u8..=254).prop_filter("no CR", |b| *b != consts::CR), 0..512)
}

fn subnegotiation(payload: &[u8]) -> Vec<u8> {
    let mut frame = vec![consts::IAC, consts::SB];
    frame.extend_from_slice(payload);
    frame.extend_from_slice(&[consts::IAC, consts::SE]);
    frame
}

// ============================================================================
// Escaping Properties
// ============================================================================

proptest! {
    #[test]
    fn data_without_iac_or_cr_survives_escape_and_decode(
        data in plain_data()
    ) {
        let mut codec = TelnetCodec::new();
        let escaped = TelnetCodec::prepare_output(&data);
        prop_assert_eq!(&escaped[..], &data[..]);
        prop_assert_eq!(codec.process_input(&escaped).to_vec(), data);
    }

    #[test]
    fn every_iac_is_doubled_then_collapsed(
        data in proptest::collection::vec(prop_oneof![Just(consts::IAC), 0u8..=12], 0..256)
    ) {
        let escaped = TelnetCodec::prepare_output(&data);
        let iac_count = data.iter().filter(|b| **b == consts::IAC).count();
        prop_assert_eq!(escaped.len(), data.len() + iac_count);
        let mut codec = TelnetCodec::new();
        prop_assert_eq!(codec.process_input(&escaped).to_vec(), data);
        prop_assert!(!codec.has_output());
    }

    #[test]
    fn arbitrary_input_never_panics_and_resynchronizes(
        noise in proptest::collection::vec(any::<u8>(), 0..1024)
    ) {
        let mut codec = TelnetCodec::new();
        codec.process_input(&noise);
        // Brings every decoder state back to plain data.
        codec.process_input(&[
            consts::IAC, consts::SE, consts::IAC, consts::SE,
            consts::IAC, consts::NOP, consts::IAC, consts::NOP,
        ]);
        prop_assert_eq!(codec.process_input(b"ok").to_vec(), b"ok".to_vec());
    }
}

// ============================================================================
// Carriage Return Handling
// ============================================================================

#[test]
fn cr_nul_decodes_to_cr() {
    let mut codec = TelnetCodec::new();
    assert_eq!(codec.process_input(&[0x0D, 0x00]).to_vec(), vec![0x0D]);
}

#[test]
fn cr_lf_decodes_to_cr_lf() {
    let mut codec = TelnetCodec::new();
    assert_eq!(codec.process_input(&[0x0D, 0x0A]).to_vec(), vec![0x0D, 0x0A]);
}

#[test]
fn cr_other_decodes_to_cr_and_byte() {
    let mut codec = TelnetCodec::new();
    assert_eq!(codec.process_input(b"\rA").to_vec(), vec![0x0D, 0x41]);
}

#[test]
fn trailing_cr_is_held_until_next_read() {
    let mut codec = TelnetCodec::new();
    assert_eq!(codec.process_input(b"ok\r").to_vec(), b"ok".to_vec());
    assert_eq!(codec.process_input(b"\n").to_vec(), b"\r\n".to_vec());
    assert_eq!(codec.process_input(b"\r").to_vec(), Vec::<u8>::new());
    assert_eq!(codec.process_input(b"\0").to_vec(), b"\r".to_vec());
}

// ============================================================================
// Negotiation
// ============================================================================

#[test]
fn will_binary_repeated_is_idempotent() {
    let mut codec = TelnetCodec::new();
    codec.process_input(&[consts::IAC, consts::WILL, consts::option::BINARY]);
    assert_eq!(
        drain_output(&mut codec),
        vec![consts::IAC, consts::DO, consts::option::BINARY]
    );
    codec.process_input(&[consts::IAC, consts::WILL, consts::option::BINARY]);
    assert!(drain_output(&mut codec).is_empty());
    assert!(codec.is_enabled_remote(TelnetOption::TransmitBinary));
}

#[test]
fn will_unknown_option_refused() {
    let mut codec = TelnetCodec::new();
    codec.process_input(&[consts::IAC, consts::WILL, 99]);
    assert_eq!(drain_output(&mut codec), vec![consts::IAC, consts::DONT, 99]);
    codec.process_input(&[consts::IAC, consts::WILL, 99]);
    assert_eq!(drain_output(&mut codec), vec![consts::IAC, consts::DONT, 99]);
    assert!(!codec.is_enabled_remote(TelnetOption::Unknown(99)));
}

#[test]
fn do_unsupported_option_refused_with_wont() {
    let mut codec = TelnetCodec::new();
    codec.process_input(&[consts::IAC, consts::DO, consts::option::ECHO]);
    assert_eq!(
        drain_output(&mut codec),
        vec![consts::IAC, consts::WONT, consts::option::ECHO]
    );
    assert!(!codec.is_enabled_local(TelnetOption::Echo));
}

#[test]
fn dont_after_do_acknowledged_once() {
    let mut codec = TelnetCodec::new();
    codec.process_input(&[consts::IAC, consts::DO, consts::option::TTYPE]);
    codec.process_input(&[consts::IAC, consts::DONT, consts::option::TTYPE]);
    codec.process_input(&[consts::IAC, consts::DONT, consts::option::TTYPE]);
    assert_eq!(
        drain_output(&mut codec),
        vec![
            consts::IAC,
            consts::WILL,
            consts::option::TTYPE,
            consts::IAC,
            consts::WONT,
            consts::option::TTYPE
        ]
    );
    assert_eq!(
        drain_events(&mut codec),
        vec![
            TelnetEvent::OptionStatus(TelnetOption::TTYPE, TelnetSide::Local, true),
            TelnetEvent::OptionStatus(TelnetOption::TTYPE, TelnetSide::Local, false),
        ]
    );
}

// ============================================================================
// Subnegotiation
// ============================================================================

#[test]
fn terminal_type_cycle_wraps_after_list() {
    let mut codec = TelnetCodec::new();
    let send = subnegotiation(&[consts::option::TTYPE, consts::option::sub::SEND]);
    let expected = ["XTERM", "VT100", "ANSI", "XTERM"];
    for name in expected {
        codec.process_input(&send);
        let mut payload = vec![consts::option::TTYPE, consts::option::sub::IS];
        payload.extend_from_slice(name.as_bytes());
        assert_eq!(drain_output(&mut codec), subnegotiation(&payload));
    }
}

#[test]
fn subnegotiation_iac_iac_unescapes_before_dispatch() {
    // An unknown option carrying an escaped IAC is dropped whole; the trailing data is intact.
    let mut codec = TelnetCodec::new();
    let input = [
        consts::IAC,
        consts::SB,
        99,
        consts::IAC,
        consts::IAC,
        consts::IAC,
        consts::SE,
        b'!',
    ];
    assert_eq!(codec.process_input(&input).to_vec(), b"!".to_vec());

    // Escaped IAC inside a LINEMODE MODE is the mode byte itself.
    let mut codec = TelnetCodec::new();
    codec.process_input(&[
        consts::IAC,
        consts::SB,
        consts::option::LINEMODE,
        consts::option::linemode::MODE,
        consts::IAC,
        consts::IAC,
        consts::IAC,
        consts::SE,
    ]);
    assert!(codec.linemode_edit());
    let echoed = drain_output(&mut codec);
    assert_eq!(
        echoed,
        subnegotiation(&[
            consts::option::LINEMODE,
            consts::option::linemode::MODE,
            consts::IAC,
        ])
    );
}

#[test]
fn forwardmask_and_slc_are_acknowledged_silently() {
    let mut codec = TelnetCodec::new();
    codec.process_input(&subnegotiation(&[consts::option::LINEMODE, 2, 0xFF, 0xFF]));
    codec.process_input(&subnegotiation(&[consts::option::LINEMODE, 3, 3, 2, 3]));
    assert!(!codec.has_output());
    assert!(drain_events(&mut codec).is_empty());
}

// ============================================================================
// Window Size
// ============================================================================

#[test]
fn update_window_size_same_dimensions_sends_once() {
    let mut codec = TelnetCodec::new();
    codec.process_input(&[consts::IAC, consts::DO, consts::option::NAWS]);
    drain_output(&mut codec);

    assert!(codec.update_window_size(WindowSize::new(100, 30)));
    assert!(!codec.update_window_size(WindowSize::new(100, 30)));
    assert_eq!(
        drain_output(&mut codec),
        subnegotiation(&[consts::option::NAWS, 0, 100, 0, 30])
    );
}

#[test]
fn window_size_high_bytes_are_encoded() {
    let mut codec = TelnetCodec::new();
    codec.process_input(&[consts::IAC, consts::DO, consts::option::NAWS]);
    drain_output(&mut codec);
    assert!(codec.update_window_size(WindowSize::new(300, 0xFF01)));
    // 0xFF in the height is escaped inside the subnegotiation
    assert_eq!(
        drain_output(&mut codec),
        vec![
            consts::IAC,
            consts::SB,
            consts::option::NAWS,
            0x01,
            0x2C,
            0xFF,
            0xFF,
            0x01,
            consts::IAC,
            consts::SE
        ]
    );
}

#[test]
fn window_size_without_naws_is_stored_only() {
    let mut codec = TelnetCodec::new();
    assert!(!codec.update_window_size(WindowSize::new(90, 30)));
    assert!(!codec.has_output());
    codec.process_input(&[consts::IAC, consts::DO, consts::option::NAWS]);
    assert_eq!(
        drain_output(&mut codec),
        [
            vec![consts::IAC, consts::WILL, consts::option::NAWS],
            subnegotiation(&[consts::option::NAWS, 0, 90, 0, 30])
        ]
        .concat()
    );
}
