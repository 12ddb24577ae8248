use rand_chacha::{
    rand_core::{RngCore, SeedableRng},
    ChaCha8Rng,
};
use test_case::test_case;

use symhuff::engine::{bitstream, Node};
use symhuff::{compress, decompress, CodecError, ContainerOptions, FrequencyTable, HuffmanCoder};

/// Random bytes drawn from the first `alphabet` values, skewed toward 0.
fn skewed_payload(seed: u64, len: usize, alphabet: u32) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len)
        .map(|_| {
            let a = rng.next_u32() % alphabet;
            let b = rng.next_u32() % alphabet;
            a.min(b) as u8
        })
        .collect()
}

#[test_case(0, 1, 1)]
#[test_case(1, 17, 2)]
#[test_case(2, 1_000, 5)]
#[test_case(3, 10_000, 64)]
#[test_case(4, 100_000, 256)]
fn random_round_trip(seed: u64, len: usize, alphabet: u32) {
    let payload = skewed_payload(seed, len, alphabet);
    let coder = HuffmanCoder::from_input(&payload);

    let bits = coder.encode_bits(&payload).unwrap();
    let packed = coder.encode(&payload).unwrap();
    assert_eq!(packed.len(), bitstream::packed_len(bits.len()));
    assert_eq!(coder.decode(&packed, payload.len()).unwrap(), payload);

    let options = ContainerOptions::default();
    let compressed = compress(&payload, &options).unwrap();
    assert_eq!(decompress(&compressed, &options).unwrap(), payload);
}

#[test]
fn uniform_random_bytes_round_trip() -> anyhow::Result<()> {
    let mut payload = vec![0; 50_000];
    ChaCha8Rng::seed_from_u64(42).fill_bytes(&mut payload);

    let options = ContainerOptions::default();
    let compressed = compress(&payload, &options)?;
    assert_eq!(decompress(&compressed, &options)?, payload);
    Ok(())
}

#[test]
fn codes_are_prefix_free_and_frequencies_sum() {
    let payload = skewed_payload(7, 5_000, 40);
    let coder = HuffmanCoder::from_input(&payload);
    assert!(coder.codes().is_prefix_free());
    assert_eq!(coder.tree().leaf_count(), coder.frequencies().len());
    assert_eq!(coder.tree().weight(), payload.len() as u64);

    for (node, _) in coder.tree().nodes() {
        if let Node::Internal { freq, left, right } = node {
            assert_eq!(*freq, left.freq() + right.freq());
        }
    }
}

#[test]
fn same_frequencies_give_identical_codes() {
    // Many ties: every symbol appears exactly three times.
    let payload: Vec<u8> = (0..100u8).flat_map(|b| [b, b, b]).collect();
    let mut shuffled = payload.clone();
    shuffled.reverse();

    let first = HuffmanCoder::from_input(&payload);
    let second = HuffmanCoder::from_input(&shuffled);
    let rebuilt = HuffmanCoder::from_frequencies(
        FrequencyTable::from_counts(first.frequencies().iter()).unwrap(),
    );

    assert_eq!(first.codes(), second.codes());
    assert_eq!(first.codes(), rebuilt.codes());
    assert_eq!(first.codes().fingerprint(), rebuilt.codes().fingerprint());
    assert_eq!(first.encode(&payload).unwrap(), rebuilt.encode(&payload).unwrap());
}

#[test]
fn abracadabra_scenario() {
    let input = b"abracadabra";
    let coder = HuffmanCoder::from_input(input);

    let counts: Vec<(u8, u64)> = coder.frequencies().iter().collect();
    assert_eq!(
        counts,
        vec![(b'a', 5), (b'b', 2), (b'c', 1), (b'd', 1), (b'r', 2)]
    );
    assert_eq!(coder.tree().leaf_count(), 5);
    assert_eq!(coder.tree().internal_count(), 4);

    let bits = coder.encode_bits(input).unwrap();
    let packed = coder.encode(input).unwrap();
    assert_eq!(packed.len(), bits.len().div_ceil(8));
    assert_eq!(coder.decode(&packed, input.len()).unwrap(), input);
}

#[test]
fn single_symbol_scenario() {
    let coder = HuffmanCoder::from_input(b"aaaa");
    assert_eq!(coder.codes().len(), 1);
    assert!(coder.codes().get(b'a').is_some_and(|code| !code.is_empty()));

    let packed = coder.encode(b"aaaa").unwrap();
    assert_eq!(packed, vec![0]);
    assert_eq!(coder.decode(&packed, 4).unwrap(), b"aaaa");
}

#[test]
fn unknown_symbol_scenario() {
    let coder = HuffmanCoder::from_input(b"ab");
    assert!(matches!(
        coder.encode(b"abc"),
        Err(CodecError::UnknownSymbol { symbol: b'c', .. })
    ));
}

#[test]
fn every_prefix_length_round_trips() {
    // Exercises every possible amount of padding in the final byte.
    let corpus = b"she sells sea shells by the sea shore";
    let coder = HuffmanCoder::from_input(corpus);
    for end in 0..=corpus.len() {
        let input = &corpus[..end];
        let packed = coder.encode(input).unwrap();
        assert_eq!(coder.decode(&packed, input.len()).unwrap(), input);
    }
}
