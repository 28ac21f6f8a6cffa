use proptest::prelude::*;
use proptest::test_runner::TestCaseResult;

use crate::{BlockDevice, DeviceGeometry, Dispatcher};

#[derive(Debug, Clone)]
enum Op {
    Write {
        start_sector: u64,
        fragments: Vec<Vec<u8>>,
    },
    Read {
        start_sector: u64,
        fragment_lens: Vec<usize>,
    },
}

const MAX_SECTORS: u64 = 64;
const MAX_OPS: usize = 48;
const MAX_FRAGMENTS: usize = 4;

fn sector_size_strategy() -> impl Strategy<Value = u32> {
    prop_oneof![Just(16u32), Just(512u32)]
}

/// Start sectors range a little past the end of the device so clipped and
/// no-op requests are exercised routinely.
fn start_sector_strategy(sector_count: u64) -> impl Strategy<Value = u64> {
    0..=sector_count + 2
}

fn fragment_len_strategy(sector_size: u32) -> impl Strategy<Value = usize> {
    0..=2 * sector_size as usize
}

fn write_op_strategy(sector_count: u64, sector_size: u32) -> BoxedStrategy<Op> {
    let fragment = fragment_len_strategy(sector_size)
        .prop_flat_map(|len| prop::collection::vec(any::<u8>(), len..=len));
    (
        start_sector_strategy(sector_count),
        prop::collection::vec(fragment, 0..=MAX_FRAGMENTS),
    )
        .prop_map(|(start_sector, fragments)| Op::Write {
            start_sector,
            fragments,
        })
        .boxed()
}

fn read_op_strategy(sector_count: u64, sector_size: u32) -> BoxedStrategy<Op> {
    (
        start_sector_strategy(sector_count),
        prop::collection::vec(fragment_len_strategy(sector_size), 0..=MAX_FRAGMENTS),
    )
        .prop_map(|(start_sector, fragment_lens)| Op::Read {
            start_sector,
            fragment_lens,
        })
        .boxed()
}

fn scenario_strategy() -> BoxedStrategy<(u64, u32, Vec<Op>)> {
    (1..=MAX_SECTORS, sector_size_strategy())
        .prop_flat_map(|(sector_count, sector_size)| {
            let op = prop_oneof![
                write_op_strategy(sector_count, sector_size),
                read_op_strategy(sector_count, sector_size),
            ];
            (
                Just(sector_count),
                Just(sector_size),
                prop::collection::vec(op, 1..=MAX_OPS),
            )
        })
        .boxed()
}

/// Reference model of the clipping copy loop over a plain `Vec<u8>`.
/// Returns the bytes the engine is expected to report.
fn model_write(model: &mut [u8], sector_size: u32, start_sector: u64, fragments: &[Vec<u8>]) -> u64 {
    let size = model.len() as u64;
    let mut position = start_sector * u64::from(sector_size);
    let mut bytes = 0u64;
    for fragment in fragments {
        let len = fragment
            .len()
            .min(usize::try_from(size.saturating_sub(position)).unwrap_or(usize::MAX));
        if len == 0 {
            continue;
        }
        let at = position as usize;
        model[at..at + len].copy_from_slice(&fragment[..len]);
        position += len as u64;
        bytes += len as u64;
    }
    bytes
}

fn run_ops(dispatcher: &Dispatcher, model: &mut [u8], sector_size: u32, ops: &[Op]) -> TestCaseResult {
    let size = model.len() as u64;

    for op in ops {
        match op {
            Op::Write {
                start_sector,
                fragments,
            } => {
                let slices: Vec<&[u8]> = fragments.iter().map(|f| f.as_slice()).collect();
                let completion = dispatcher.write(*start_sector, &slices).unwrap();
                prop_assert!(completion.status.is_ok());

                let expected = model_write(model, sector_size, *start_sector, fragments);
                prop_assert_eq!(completion.bytes_transferred, expected);
            }
            Op::Read {
                start_sector,
                fragment_lens,
            } => {
                let mut bufs: Vec<Vec<u8>> =
                    fragment_lens.iter().map(|len| vec![0xA5u8; *len]).collect();
                let mut slices: Vec<&mut [u8]> =
                    bufs.iter_mut().map(|b| b.as_mut_slice()).collect();
                let completion = dispatcher.read(*start_sector, &mut slices).unwrap();
                prop_assert!(completion.status.is_ok());

                let mut position = *start_sector * u64::from(sector_size);
                let mut bytes = 0u64;
                for buf in &bufs {
                    let len = buf
                        .len()
                        .min(usize::try_from(size.saturating_sub(position)).unwrap_or(usize::MAX));
                    if len > 0 {
                        let at = position as usize;
                        prop_assert_eq!(&buf[..len], &model[at..at + len]);
                        position += len as u64;
                        bytes += len as u64;
                    }
                    // The clipped tail of a fragment must stay untouched.
                    prop_assert!(buf[len..].iter().all(|b| *b == 0xA5));
                }
                prop_assert_eq!(completion.bytes_transferred, bytes);
            }
        }
    }

    // Full-device readback must match the model exactly.
    let mut all = vec![0u8; model.len()];
    let mut slices: Vec<&mut [u8]> = vec![all.as_mut_slice()];
    let completion = dispatcher.read(0, &mut slices).unwrap();
    prop_assert!(completion.status.is_ok());
    prop_assert_eq!(completion.bytes_transferred, model.len() as u64);
    prop_assert_eq!(all.as_slice(), &*model);

    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 32,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_dispatch_matches_reference((sector_count, sector_size, ops) in scenario_strategy()) {
        let geometry = DeviceGeometry::new(sector_count, sector_size).unwrap();
        let device = BlockDevice::create(geometry).unwrap();
        let dispatcher = Dispatcher::new(device);
        let mut model = vec![0u8; geometry.size_bytes() as usize];

        run_ops(&dispatcher, &mut model, sector_size, &ops)?;
    }
}
