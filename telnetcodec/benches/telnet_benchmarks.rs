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

//! Benchmarks for telnetcodec performance

use bytes::{Bytes, BytesMut};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use otelnet_telnetcodec::{TelnetCodec, TelnetFrame, TelnetOption, consts};
use std::hint::black_box;
use tokio_util::codec::{Decoder, Encoder};

// ============================================================================
// Encoding Benchmarks
// ============================================================================

fn bench_prepare_output(c: &mut Criterion) {
    let mut group = c.benchmark_group("prepare_output");

    for size in [10, 100, 1000, 10000].iter() {
        group.throughput(Throughput::Bytes(*size as u64));

        group.bench_with_input(BenchmarkId::new("plain", size), size, |b, &size| {
            let data: Vec<u8> = (0..size).map(|i| (i % 255) as u8).collect();
            b.iter(|| TelnetCodec::prepare_output(black_box(&data)));
        });

        group.bench_with_input(BenchmarkId::new("all_iac", size), size, |b, &size| {
            let data = vec![consts::IAC; size];
            b.iter(|| TelnetCodec::prepare_output(black_box(&data)));
        });
    }

    group.finish();
}

fn bench_encode_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_frames");

    group.bench_function("negotiation", |b| {
        let mut codec = TelnetCodec::new();
        let mut buffer = BytesMut::with_capacity(64);
        b.iter(|| {
            buffer.clear();
            codec
                .encode(black_box(TelnetFrame::Will(TelnetOption::NAWS)), &mut buffer)
                .unwrap();
        });
    });

    group.bench_function("subnegotiation", |b| {
        let mut codec = TelnetCodec::new();
        let mut buffer = BytesMut::with_capacity(64);
        let payload = Bytes::from_static(&[consts::option::NAWS, 0, 80, 0xFF, 0xFF]);
        b.iter(|| {
            buffer.clear();
            codec
                .encode(black_box(TelnetFrame::Subnegotiate(payload.clone())), &mut buffer)
                .unwrap();
        });
    });

    group.finish();
}

// ============================================================================
// Decoding Benchmarks
// ============================================================================

fn bench_process_input(c: &mut Criterion) {
    let mut group = c.benchmark_group("process_input");

    for size in [10, 100, 1000, 10000].iter() {
        group.throughput(Throughput::Bytes(*size as u64));

        group.bench_with_input(BenchmarkId::new("text", size), size, |b, &size| {
            let data: Vec<u8> = b"The quick brown fox\r\n"
                .iter()
                .copied()
                .cycle()
                .take(size)
                .collect();
            let mut codec = TelnetCodec::new();
            b.iter(|| codec.process_input(black_box(&data)));
        });

        group.bench_with_input(BenchmarkId::new("escaped_iac", size), size, |b, &size| {
            let data = vec![consts::IAC; size - size % 2];
            let mut codec = TelnetCodec::new();
            b.iter(|| codec.process_input(black_box(&data)));
        });
    }

    group.finish();
}

fn bench_negotiation(c: &mut Criterion) {
    let mut group = c.benchmark_group("negotiation");

    group.bench_function("repeated_will_echo", |b| {
        let mut codec = TelnetCodec::new();
        let input = [consts::IAC, consts::WILL, consts::option::ECHO];
        b.iter(|| {
            codec.process_input(black_box(&input));
            codec.take_output()
        });
    });

    group.bench_function("refused_option", |b| {
        let mut codec = TelnetCodec::new();
        let input = [consts::IAC, consts::DO, 200];
        b.iter(|| {
            codec.process_input(black_box(&input));
            codec.take_output()
        });
    });

    group.bench_function("terminal_type_send", |b| {
        let mut codec = TelnetCodec::new();
        let input = [
            consts::IAC,
            consts::SB,
            consts::option::TTYPE,
            consts::option::sub::SEND,
            consts::IAC,
            consts::SE,
        ];
        b.iter(|| {
            codec.process_input(black_box(&input));
            codec.take_output()
        });
    });

    group.finish();
}

// ============================================================================
// Scenario Benchmarks
// ============================================================================

fn bench_realistic_scenarios(c: &mut Criterion) {
    let mut group = c.benchmark_group("realistic_scenarios");

    group.bench_function("connect_and_login_prompt", |b| {
        let mut server = BytesMut::new();
        for frame in [
            TelnetFrame::Will(TelnetOption::Echo),
            TelnetFrame::Will(TelnetOption::SuppressGoAhead),
            TelnetFrame::Do(TelnetOption::TTYPE),
            TelnetFrame::Do(TelnetOption::NAWS),
            TelnetFrame::Subnegotiate(Bytes::from_static(&[
                consts::option::TTYPE,
                consts::option::sub::SEND,
            ])),
        ] {
            frame.write_to(&mut server);
        }
        server.extend_from_slice(b"\r\nUbuntu 24.04 LTS\r\nlogin: ");
        let server = server.freeze();

        b.iter(|| {
            let mut codec = TelnetCodec::new();
            codec.initial_negotiation();
            let mut src = BytesMut::from(&server[..]);
            let payload = codec.decode(black_box(&mut src)).unwrap();
            (payload, codec.take_output())
        });
    });

    group.finish();
}

// ============================================================================
// Benchmark Groups
// ============================================================================

criterion_group!(encoding_benches, bench_prepare_output, bench_encode_frames);

criterion_group!(decoding_benches, bench_process_input, bench_negotiation);

criterion_group!(scenario_benches, bench_realistic_scenarios);

criterion_main!(encoding_benches, decoding_benches, scenario_benches);
