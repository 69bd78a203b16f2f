use std::hint::black_box;

use dyn_size_of::GetSize;
use huffman_tree::{count, DecodingResult, Tree};

use crate::compare_texts;

pub fn benchmark(conf: &super::Conf) {
    let text = conf.text();

    conf.print_speed("Counting symbol occurrences", conf.measure(||
        count::<u8, _>(text.iter())
    ));
    let frequencies = count::<u8, _>(text.iter());

    let dec_const = conf.measure(|| Tree::from_frequencies(frequencies.clone()));
    let tree = match Tree::from_frequencies(frequencies) {
        Ok(tree) => tree,
        Err(e) => { println!("FAIL: {}", e); return; }
    };
    let enc_const = conf.measure(|| tree.codes());
    conf.print_time("Decoder (tree) construction time", dec_const);
    conf.print_time("Encoder (code table) construction time", enc_const);
    println!("Decoder size [bytes]: {}", tree.size_bytes());

    let codes = tree.codes();
    println!("Encoder size [bytes]: {}", codes.size_bytes());

    conf.print_speed("Encoding", conf.measure(|| codes.encode(text.iter())));
    let bits = match codes.encode(text.iter()) {
        Ok(bits) => bits,
        Err(e) => { println!("FAIL: {}", e); return; }
    };

    conf.print_speed("Decoding bit by bit", conf.measure(|| {
        let mut d = tree.decoder();
        for b in bits.bytes() {
            if let DecodingResult::Value(v) = d.consume(b == b'1') {
                black_box(v);
            }
        }
    }));
    conf.print_speed("Decoding into vector", conf.measure(|| tree.decode(&bits)));

    if conf.verify {
        print!("Verification... ");
        match tree.decode(&bits) {
            Ok(decoded_text) => compare_texts(&text, &decoded_text),
            Err(e) => println!("FAIL: {}", e)
        }
    }
}
