use std::hint::black_box;
use bit_vec::BitVec;
use huffman_compress::{Book, CodeBuilder};
use huffman_tree::{count, FrequencyTable, Tree};

use crate::compare_texts;

/// Builds the coder, pushing the symbols in order of their first occurrence in the text.
fn build_coder(frequencies: &FrequencyTable<u8>) -> (Book<u8>, huffman_compress::Tree<u8>) {
    frequencies.iter()
        .fold(CodeBuilder::with_capacity(frequencies.len()), |mut builder, (symbol, weight)| {
            builder.push(*symbol, weight);
            builder
        })
        .finish()
}

/// Encodes `text` with `book`. On failure, returns the position of the symbol missing from `book`.
fn encode(text: &[u8], book: &Book<u8>) -> Result<BitVec, usize> {
    let mut compressed_text = BitVec::new();
    for (position, symbol) in text.iter().enumerate() {
        book.encode(&mut compressed_text, symbol).map_err(|_| position)?;
    }
    Ok(compressed_text)
}

pub fn benchmark(conf: &super::Conf) {
    let text = conf.text();

    conf.print_speed("Counting symbol occurrences", conf.measure(||
        count::<u8, _>(text.iter())
    ));
    let frequencies = count::<u8, _>(text.iter());

    conf.print_time("Decoder + encoder construction time", conf.measure(|| build_coder(&frequencies)));
    let (book, tree) = build_coder(&frequencies);

    // each internal node of the tree takes about 24 bytes
    println!("Approximate decoder size [bytes]: {}", 24 * (frequencies.len() - 1) + 32);

    conf.print_speed("Looking up codewords", conf.measure(|| {
        for symbol in text.iter() { black_box(book.get(symbol)); }
    }));
    conf.print_speed("Encoding into bit vector", conf.measure(|| encode(&text, &book)));
    let compressed_text = match encode(&text, &book) {
        Ok(bits) => bits,
        Err(position) => { println!("FAIL: symbol at position {} has no codeword", position); return; }
    };
    println!("Encoded size [bits]: {}", compressed_text.len());

    conf.print_speed("Decoding", conf.measure(|| {
        for symbol in tree.unbounded_decoder(compressed_text.iter()) { black_box(symbol); }
    }));

    if conf.verify {
        print!("Verification... ");
        match Tree::from_frequencies(frequencies) {
            Ok(t) if t.total_bits() != compressed_text.len() as u64 =>
                println!("FAIL: encoded size {} differs from the optimal {}", compressed_text.len(), t.total_bits()),
            _ => compare_texts(&text, &tree.unbounded_decoder(compressed_text.iter()).collect::<Vec<_>>())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_size_is_optimal() {
        let text = b"abracadabra";
        let frequencies = count::<u8, _>(text.iter());
        let (book, tree) = build_coder(&frequencies);
        let bits = encode(text, &book).unwrap();
        assert_eq!(bits.len() as u64, Tree::from_frequencies(frequencies).unwrap().total_bits());
        assert_eq!(tree.unbounded_decoder(bits.iter()).collect::<Vec<_>>(), text);
    }

    #[test]
    fn encode_missing_symbol() {
        let (book, _) = build_coder(&count::<u8, _>(b"ab".iter()));
        assert_eq!(encode(b"abcab", &book), Err(2));
    }
}
