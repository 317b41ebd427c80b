use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use gumdrop::Options;
use serde::Serialize;

use levnet::constants::DEFAULT_SEED;
use levnet::{
    Dictionary, Distance, LengthBuckets, NeighborLookup, Network, NetworkConfig,
    NetworkDiscoverer, PrefixIndex, SelfMatch,
};

trait OutputWriter {
    fn write_network(&mut self, network: &Network, config: &NetworkConfig) -> anyhow::Result<()>;
    fn write_friends(
        &mut self,
        word: &str,
        friends: &[&str],
        config: &NetworkConfig,
    ) -> anyhow::Result<()>;
    fn finish(&mut self);
}

struct StdoutWriter;

impl OutputWriter for StdoutWriter {
    fn write_network(&mut self, network: &Network, _config: &NetworkConfig) -> anyhow::Result<()> {
        println!("{}", network.len());
        Ok(())
    }

    fn write_friends(
        &mut self,
        _word: &str,
        friends: &[&str],
        _config: &NetworkConfig,
    ) -> anyhow::Result<()> {
        for friend in friends {
            println!("{}", friend);
        }
        Ok(())
    }

    fn finish(&mut self) {}
}

#[derive(Serialize)]
struct NetworkReport<'a> {
    seed: &'a str,
    config: &'a NetworkConfig,
    size: usize,
    expansions: usize,
    words: Vec<&'a str>,
}

#[derive(Serialize)]
struct FriendsReport<'a> {
    word: &'a str,
    config: &'a NetworkConfig,
    friends: &'a [&'a str],
}

struct JsonWriter {
    results: Vec<serde_json::Value>,
}

impl JsonWriter {
    pub fn new() -> JsonWriter {
        JsonWriter { results: vec![] }
    }
}

impl OutputWriter for JsonWriter {
    fn write_network(&mut self, network: &Network, config: &NetworkConfig) -> anyhow::Result<()> {
        let report = NetworkReport {
            seed: network.seed(),
            config,
            size: network.len(),
            expansions: network.expansions(),
            words: network.sorted(),
        };
        self.results.push(serde_json::to_value(&report)?);
        Ok(())
    }

    fn write_friends(
        &mut self,
        word: &str,
        friends: &[&str],
        config: &NetworkConfig,
    ) -> anyhow::Result<()> {
        let report = FriendsReport {
            word,
            config,
            friends,
        };
        self.results.push(serde_json::to_value(&report)?);
        Ok(())
    }

    fn finish(&mut self) {
        for result in &self.results {
            match serde_json::to_string_pretty(result) {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("{}", e),
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Backend {
    Trie,
    Scan,
}

impl Default for Backend {
    fn default() -> Backend {
        Backend::Trie
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Backend, String> {
        match s {
            "trie" => Ok(Backend::Trie),
            "scan" => Ok(Backend::Scan),
            other => Err(format!("unknown backend '{}' (expected trie or scan)", other)),
        }
    }
}

#[derive(Debug, Options)]
struct Args {
    #[options(help = "print help message")]
    help: bool,

    #[options(free, help = "dictionary file of whitespace-separated words")]
    dictionary: Option<PathBuf>,

    #[options(help = "word whose network is discovered (default: causes)")]
    seed: Option<String>,

    #[options(help = "maximum edit distance between friends")]
    threshold: Option<Distance>,

    #[options(
        no_short,
        long = "include-self",
        help = "report a dictionary word among its own friends"
    )]
    include_self: bool,

    #[options(
        no_short,
        long = "exclude-self",
        help = "never report a word among its own friends (default)"
    )]
    exclude_self: bool,

    #[options(help = "neighbor lookup backend: trie (default) or scan")]
    backend: Backend,

    #[options(no_short, help = "print the seed's direct friends instead of its network size")]
    friends: bool,

    #[options(no_short, long = "json", help = "output in JSON format")]
    use_json: bool,

    #[options(help = "JSON config file; flags take precedence")]
    config: Option<PathBuf>,
}

fn load_config(args: &Args) -> anyhow::Result<NetworkConfig> {
    let mut config = match args.config.as_ref() {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("Could not open config {}", path.display()))?;
            NetworkConfig::from_json(file)
                .with_context(|| format!("Invalid config {}", path.display()))?
        }
        None => NetworkConfig::default(),
    };

    if let Some(threshold) = args.threshold {
        config.threshold = threshold;
    }

    match (args.include_self, args.exclude_self) {
        (true, true) => anyhow::bail!("--include-self and --exclude-self are mutually exclusive"),
        (true, false) => config.self_matches = SelfMatch::Include,
        (false, true) => config.self_matches = SelfMatch::Exclude,
        (false, false) => {}
    }

    Ok(config)
}

fn build_lookup(backend: Backend, dictionary: &Dictionary) -> Arc<dyn NeighborLookup + Send + Sync> {
    match backend {
        Backend::Trie => Arc::new(PrefixIndex::from(dictionary)),
        Backend::Scan => Arc::new(LengthBuckets::from(dictionary)),
    }
}

fn run(
    discoverer: &NetworkDiscoverer<dyn NeighborLookup + Send + Sync>,
    seed: &str,
    show_friends: bool,
    writer: &mut dyn OutputWriter,
    config: &NetworkConfig,
) -> anyhow::Result<()> {
    if show_friends {
        let friends = discoverer.friends_of_with_config(seed, config);
        let mut friends: Vec<&str> = friends.iter().map(|f| f.as_str()).collect();
        friends.sort_unstable();
        writer.write_friends(seed, &friends, config)
    } else {
        let network = discoverer.discover_with_config(seed, config);
        writer.write_network(&network, config)
    }
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let args = Args::parse_args_default_or_exit();

    let path = match args.dictionary.as_ref() {
        Some(path) => path,
        None => anyhow::bail!("No dictionary given; see --help"),
    };

    let config = load_config(&args)?;
    let dictionary = Dictionary::open(path)?;
    let discoverer = NetworkDiscoverer::new(build_lookup(args.backend, &dictionary));
    let seed = args.seed.as_deref().unwrap_or(DEFAULT_SEED);

    let mut writer: Box<dyn OutputWriter> = if args.use_json {
        Box::new(JsonWriter::new())
    } else {
        Box::new(StdoutWriter)
    };

    run(&discoverer, seed, args.friends, &mut *writer, &config)?;

    writer.finish();

    Ok(())
}
