#![doc = include_str!("../README.md")]
mod tree;
mod huffman_compress;

use std::{hint::black_box, time::Instant};

use clap::{Parser, Subcommand};

use rand::prelude::*;
use rand::distributions::WeightedIndex;
use rand_pcg::Pcg64Mcg;

#[derive(Subcommand)]
pub enum Coder {
    /// Huffman coding implementation from huffman_tree
    #[clap(visible_alias = "ht")]
    Tree,
    /// Huffman coding implementation from huffman-compress
    #[clap(visible_alias = "hc")]
    HuffmanCompress,
    /// Tests all supported coders
    All
}

#[derive(Parser)]
#[command(author, version, about, long_about = None, infer_subcommands=true)]
/// Huffman coding benchmark.
pub struct Conf {
    /// Coder to test
    #[command(subcommand)]
    pub coder: Coder,

    /// Length of the test text
    #[arg(short = 'l', long, default_value_t = 1024*1024, value_parser = clap::value_parser!(u32).range(1..))]
    pub len: u32,

    /// Number of different symbols in the test text.
    #[arg(long, default_value_t = 256, value_parser = clap::value_parser!(u16).range(1..=256))]
    pub symbols: u16,

    /// The spread of the number of symbols (0 for all about equal).
    /// Each successive symbol occurs 1+SPREAD/1000 times more often than the previous one.
    #[arg(short = 'r', long, default_value_t = 100)]
    pub spread: u32,

    /// Time (in seconds) of measuring and warming up the CPU cache before measuring
    #[arg(short='t', long, default_value_t = 5)]
    pub time: u16,

    /// Whether to check the validity
    #[arg(long, default_value_t = false)]
    pub verify: bool,

    /// Seed for random number generators
    #[arg(short='s', long, default_value_t = 1234)]
    pub seed: u64,
}

impl Conf {
    /// Returns pseudo-random text for testing. Each of `symbols` first bytes occurs at least once.
    fn text(&self) -> Box<[u8]> {
        let len = self.len as usize;
        if len <= self.symbols as usize { return (0..len).map(|v| v as u8).collect(); }

        let spread = 1.0 + self.spread as f64*0.001;
        let weights: Vec<_> = (1..=self.symbols as i32).map(|v| spread.powi(v)).collect();
        let dist = match WeightedIndex::new(weights) {
            Ok(dist) => dist,
            Err(e) => panic!("cannot draw symbols with spread {}: {}", self.spread, e)
        };
        let rng = Pcg64Mcg::seed_from_u64(self.seed);

        (0..self.symbols).map(|v| v as u8).chain(
            dist.sample_iter(rng).map(|v| v as u8).take(len - self.symbols as usize)
        ).collect()
    }

    /// Returns the average time (in seconds) of calling `f`, measured after warming up for `self.time` seconds.
    #[inline(always)] fn measure<R, F>(&self, mut f: F) -> f64
     where F: FnMut() -> R
    {
        let mut iters = 1;
        if self.time > 0 {
            let time = Instant::now();
            loop {
                black_box(f());
                if time.elapsed().as_secs() > self.time as u64 { break; }
                iters += 1;
            }
        }
        let start_moment = Instant::now();
        for _ in 0..iters { black_box(f()); }
        return start_moment.elapsed().as_secs_f64() / iters as f64
    }

    fn print_speed(&self, label: &str, sec: f64) {
        let mb = self.len as f64 / (1024 * 1024) as f64;
        println!("{}: {:.0} mb/sec", label, mb / sec);
    }

    fn print_time(&self, label: &str, sec: f64) {
        println!("{} [ns]: {:.0}", label, sec * 1_000_000_000.0);
    }
}

fn compare_texts(original: &[u8], decoded: &[u8]) {
    if original.len() == decoded.len() {
        for (i, (e, g)) in original.iter().zip(decoded).enumerate() {
            if e != g {
                println!("FAIL: decoded text at index {} has {}, while the original has {}", i, g, e);
                return;
            }
        }
    } else {
        println!("FAIL: decoded text has length {} different from original {}", decoded.len(), original.len());
    }
    println!("DONE")
}

fn main() {
    let conf: Conf = Conf::parse();
    match conf.coder {
        Coder::Tree => tree::benchmark(&conf),
        Coder::HuffmanCompress => huffman_compress::benchmark(&conf),
        Coder::All => {
            tree::benchmark(&conf);
            huffman_compress::benchmark(&conf);
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conf(len: u32, symbols: u16) -> Conf {
        Conf { coder: Coder::Tree, len, symbols, spread: 100, time: 0, verify: true, seed: 1234 }
    }

    #[test]
    fn text_contains_all_symbols() {
        let text = conf(1000, 16).text();
        assert_eq!(text.len(), 1000);
        for s in 0..16u8 { assert!(text.contains(&s)); }
        assert!(text.iter().all(|s| *s < 16));
    }

    #[test]
    fn short_text() {
        assert_eq!(conf(3, 256).text().as_ref(), [0, 1, 2]);
    }

    #[test]
    fn text_is_reproducible() {
        assert_eq!(conf(500, 40).text(), conf(500, 40).text());
    }

    #[test]
    fn parse_arguments() {
        let conf = Conf::try_parse_from(["huffman_benchmark", "-l", "100", "--symbols", "8", "--verify", "ht"]).unwrap();
        assert!(matches!(conf.coder, Coder::Tree));
        assert_eq!(conf.len, 100);
        assert_eq!(conf.symbols, 8);
        assert!(conf.verify);
        assert!(Conf::try_parse_from(["huffman_benchmark", "--symbols", "0", "all"]).is_err());
        assert!(Conf::try_parse_from(["huffman_benchmark", "-l", "0", "all"]).is_err());
    }
}
