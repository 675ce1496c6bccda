//! Chunk-boundary parity tests for the start-tag scanner.
//!
//! Property: for any document and any split of it into ordered chunks
//! (last chunk final), the emitted start-tag sequence equals the
//! single-chunk result. Coverage combines exhaustive two-chunk splits,
//! fixed chunk sizes, and seeded random boundary sets for reproducibility.

use crate::test_util::scan_split;

const CASES: &[&str] = &[
    "<html><head><link rel=\"stylesheet\" href=\"/a.css\"></head></html>",
    "<link rel='shortcut icon' href='icon.png'><img src=b.png><script src=\"c.js\"></script>",
    "<!-- <img src=hidden.png> --><IMG SRC=\"shown.png\">",
    "<script>var s = \"</scr\" + \"ipt> <img src=x>\";</script><p class=x>tail</p>",
    "<style>a::before { content: \"<\" }</style><br/><img src='q mark?.png'>",
    "text < not a tag <img\tsrc=split.png\n>more text",
    "<!DOCTYPE html><?xml?><![CDATA[ignored]]><div data-a data-b=2>",
    "café <b>naïve</b> 😀<img src=\"emoji 😀.png\">",
    "<img src=\"unterminated",
];

const FIXED_SIZES: &[usize] = &[1, 2, 3, 4, 7, 16];
const SEEDS_PER_CASE: usize = 64;
const SEED_MIX: u64 = 0x9e3779b97f4a7c15;

#[test]
fn chunk_parity_two_chunk_splits_match_single_chunk() {
    for (case_idx, input) in CASES.iter().enumerate() {
        let bytes = input.as_bytes();
        let expected = scan_split(bytes, &[]);
        for cut in 1..bytes.len() {
            let got = scan_split(bytes, &[cut]);
            assert_eq!(
                got, expected,
                "case {case_idx} split at byte {cut} changed the result"
            );
        }
    }
}

#[test]
fn chunk_parity_fixed_sizes_match_single_chunk() {
    for (case_idx, input) in CASES.iter().enumerate() {
        let bytes = input.as_bytes();
        let expected = scan_split(bytes, &[]);
        for &size in FIXED_SIZES {
            let mut boundaries = Vec::new();
            let mut offset = size;
            while offset < bytes.len() {
                boundaries.push(offset);
                offset += size;
            }
            let got = scan_split(bytes, &boundaries);
            assert_eq!(
                got, expected,
                "case {case_idx} fixed size {size} changed the result"
            );
        }
    }
}

#[test]
fn chunk_parity_seeded_random_boundaries_match_single_chunk() {
    for (case_idx, input) in CASES.iter().enumerate() {
        let bytes = input.as_bytes();
        let expected = scan_split(bytes, &[]);
        let base_seed = 0x70757368_7363616e_u64 ^ case_idx as u64;
        for iter in 0..SEEDS_PER_CASE {
            let seed = base_seed ^ (iter as u64).wrapping_mul(SEED_MIX);
            let mut rng = Lcg::new(seed);
            let boundaries = random_boundaries(&mut rng, bytes.len());
            let got = scan_split(bytes, &boundaries);
            assert_eq!(
                got, expected,
                "case {case_idx} seed=0x{seed:016x} boundaries={boundaries:?} changed the result"
            );
        }
    }
}

#[test]
fn chunk_parity_empty_chunks_are_inert() {
    let bytes = CASES[0].as_bytes();
    let expected = scan_split(bytes, &[]);
    // Duplicate boundaries produce zero-length feeds between them.
    let mid = bytes.len() / 2;
    let got = scan_split(bytes, &[0, mid, mid, bytes.len()]);
    assert_eq!(got, expected, "empty chunks changed the result");
}

fn random_boundaries(rng: &mut Lcg, len: usize) -> Vec<usize> {
    if len <= 1 {
        return Vec::new();
    }
    let max_points = (len - 1).min(32);
    let count = rng.gen_range(max_points + 1);
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        out.push(1 + rng.gen_range(len - 1));
    }
    out.sort_unstable();
    out.dedup();
    out
}

struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        let state = if seed == 0 { SEED_MIX } else { seed };
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    fn gen_range(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        (self.next_u64() >> 32) as usize % upper
    }
}
