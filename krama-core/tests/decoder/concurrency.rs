//! A single decoder shared across threads.

use std::thread;

use crate::common::{random_model, syndrome_of};

use krama_core::{canonicalize, SearchDecoder};

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_decoder_is_send_sync() {
    assert_send_sync::<SearchDecoder>();
}

#[test]
fn test_concurrent_decodes_match_sequential() {
    let m = canonicalize(&random_model(11, 16, 40, 3, 3));
    let decoder = SearchDecoder::new(m.clone()).unwrap();

    let syndromes: Vec<Vec<u64>> = (0..32)
        .map(|i| syndrome_of(&m, &[i % m.len(), (i * 7 + 3) % m.len()]))
        .collect();
    let sequential: Vec<_> = syndromes.iter().map(|s| decoder.decode(s)).collect();

    let concurrent: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = syndromes
            .chunks(8)
            .map(|chunk| {
                let decoder = &decoder;
                scope.spawn(move || chunk.iter().map(|s| decoder.decode(s)).collect::<Vec<_>>())
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect()
    });

    assert_eq!(sequential, concurrent);
}
