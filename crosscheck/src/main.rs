/*! Differential testing of neighbor lookups

Looks up the neighbors of dictionary words with both the prefix tree and the
length-bucket scan, and reports every word on which they disagree. The scan
compares candidates one by one, so it serves as the reference.

# Usage examples

```console
$ cargo run -p crosscheck -- --dictionary words.txt --step 50 --json-output report.json
```
checks every 50th word of `words.txt` and writes the per-word timings and any
disagreements to `report.json`. The exit code is non-zero when a disagreement
was found.
*/

use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use serde::Serialize;

use levnet::constants::DEFAULT_THRESHOLD;
use levnet::{Dictionary, Distance, LengthBuckets, NeighborLookup, PrefixIndex};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, value_name = "DICTIONARY")]
    dictionary: PathBuf,
    #[arg(short, long, value_name = "THOLD", default_value_t = DEFAULT_THRESHOLD)]
    threshold: Distance,
    #[arg(short = 'w', long, value_name = "N")]
    max_words: Option<usize>,
    #[arg(short, long, value_name = "N", default_value_t = 1)]
    step: usize,
    #[arg(short = 'o', long, value_name = "JSON-OUTPUT")]
    json_output: Option<PathBuf>,
}

#[derive(Debug, Default, Serialize, PartialOrd, Ord, PartialEq, Eq, Clone, Copy)]
struct Time {
    secs: u64,
    subsec_nanos: u32,
}

impl Time {
    fn since(start: Instant) -> Time {
        let elapsed = start.elapsed();
        Time {
            secs: elapsed.as_secs(),
            subsec_nanos: elapsed.subsec_nanos(),
        }
    }

    fn as_micros(&self) -> u64 {
        self.secs * 1_000_000 + (self.subsec_nanos as u64 / 1_000)
    }
}

impl std::fmt::Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(f, "{}µs", self.as_micros())
    }
}

#[derive(Debug, Serialize)]
struct CheckResult<'a> {
    word: &'a str,
    neighbors: usize,
    /// Found by the scan but not by the prefix tree
    missing: Vec<String>,
    /// Found by the prefix tree but not by the scan
    unexpected: Vec<String>,
    trie_time: Time,
    scan_time: Time,
}

impl<'a> CheckResult<'a> {
    fn agrees(&self) -> bool {
        self.missing.is_empty() && self.unexpected.is_empty()
    }
}

#[derive(Serialize, Default, Debug, Clone)]
struct Summary {
    total_words: u32,
    disagreements: u32,
    average_neighbors: f32,
    trie_average: Time,
    trie_slowest: Time,
    scan_average: Time,
    scan_slowest: Time,
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(
            f,
            "[words] {} [disagree] {} [avg neighbors] {:.2} [trie] {} avg {} max [scan] {} avg {} max",
            self.total_words,
            self.disagreements,
            self.average_neighbors,
            self.trie_average,
            self.trie_slowest,
            self.scan_average,
            self.scan_slowest
        )
    }
}

fn average(times: impl Iterator<Item = Time>) -> Time {
    let (count, total) = times.fold((0u64, 0u64), |(n, sum), t| (n + 1, sum + t.as_micros()));
    let micros = if count == 0 { 0 } else { total / count };

    Time {
        secs: micros / 1_000_000,
        subsec_nanos: ((micros % 1_000_000) * 1_000) as u32,
    }
}

impl Summary {
    fn new(results: &[CheckResult<'_>]) -> Summary {
        let total_words = results.len() as u32;
        let neighbors: usize = results.iter().map(|r| r.neighbors).sum();

        Summary {
            total_words,
            disagreements: results.iter().filter(|r| !r.agrees()).count() as u32,
            average_neighbors: if total_words == 0 {
                0.0
            } else {
                neighbors as f32 / total_words as f32
            },
            trie_average: average(results.iter().map(|r| r.trie_time)),
            trie_slowest: results.iter().map(|r| r.trie_time).max().unwrap_or_default(),
            scan_average: average(results.iter().map(|r| r.scan_time)),
            scan_slowest: results.iter().map(|r| r.scan_time).max().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    dictionary: &'a PathBuf,
    dictionary_words: usize,
    threshold: Distance,
    summary: Summary,
    results: Vec<CheckResult<'a>>,
    total_time: Time,
}

fn check<'a>(
    word: &'a str,
    threshold: Distance,
    trie: &PrefixIndex,
    scan: &LengthBuckets,
) -> CheckResult<'a> {
    let now = Instant::now();
    let found = trie.neighbors(word, threshold);
    let trie_time = Time::since(now);

    let now = Instant::now();
    let expected = scan.neighbors(word, threshold);
    let scan_time = Time::since(now);

    let mut missing: Vec<String> = expected.difference(&found).map(|w| w.to_string()).collect();
    let mut unexpected: Vec<String> = found.difference(&expected).map(|w| w.to_string()).collect();
    missing.sort();
    unexpected.sort();

    CheckResult {
        word,
        neighbors: expected.len(),
        missing,
        unexpected,
        trie_time,
        scan_time,
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    let dictionary = Dictionary::open(&cli.dictionary)?;
    let trie = PrefixIndex::from(&dictionary);
    let scan = LengthBuckets::from(&dictionary);

    let words: Vec<&str> = dictionary
        .iter()
        .step_by(cli.step.max(1))
        .take(cli.max_words.unwrap_or(usize::MAX))
        .collect();

    let pb = ProgressBar::new(words.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar().template("{pos}/{len} [{percent}%] {wide_bar} {elapsed_precise}"),
    );

    let start_time = Instant::now();
    let results = words
        .par_iter()
        .progress_with(pb)
        .map(|word| check(word, cli.threshold, &trie, &scan))
        .collect::<Vec<_>>();
    let total_time = Time::since(start_time);

    for result in results.iter().filter(|r| !r.agrees()) {
        println!(
            "DISAGREEMENT: {} missing {:?} unexpected {:?}",
            result.word, result.missing, result.unexpected
        );
    }

    let summary = Summary::new(&results);
    println!("{}", summary);

    let disagreements = summary.disagreements;

    if let Some(path) = cli.json_output.as_ref() {
        let output = std::fs::File::create(path)?;
        let report = Report {
            dictionary: &cli.dictionary,
            dictionary_words: trie.len(),
            threshold: cli.threshold,
            summary,
            results,
            total_time,
        };
        println!("Writing JSON report…");
        serde_json::to_writer_pretty(output, &report)?;
    }

    if disagreements > 0 {
        std::process::exit(1);
    }

    Ok(())
}
