use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use hand_capture::capture::{CaptureParser, JointName, COLUMNS_PER_JOINT};

fn capture_text(frames: usize) -> String {
    let mut text = String::from("t_mono,t_wall,chirality");
    for joint in JointName::ALL {
        for suffix in ["px", "py", "pz", "qx", "qy", "qz", "qw"] {
            text.push_str(&format!(",{}_{}", joint, suffix));
        }
    }
    text.push('\n');

    for i in 0..frames {
        let t = i as f64 / 90.0;
        text.push_str(&format!("{:.6},{:.6},right", t, 1_700_000_000.0 + t));
        for j in 0..JointName::ALL.len() * COLUMNS_PER_JOINT {
            text.push_str(&format!(",{:.5}", (i + j) as f64 * 0.001));
        }
        text.push('\n');
    }
    text
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_capture");
    for frames in [90, 900, 5400] {
        let text = capture_text(frames);
        group.bench_with_input(BenchmarkId::from_parameter(frames), &text, |b, text| {
            b.iter(|| {
                let mut parser = CaptureParser::new();
                std::hint::black_box(parser.parse(text).unwrap());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
