//! Command-line interface for the AES-128 engine.

#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};

use aes_core::{decrypt_block, encrypt_block, expand_key, Aes128Key};
use aes_modes::{Cipher, Envelope, LogObserver, Mode, ENVELOPE_VERSION};
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// AES-128 CLI.
#[derive(Parser)]
#[command(
    name = "aes128",
    version,
    author,
    about = "AES-128 encryption in ECB and CBC modes"
)]
struct Cli {
    /// Log per-call summaries.
    #[arg(long, short, global = true)]
    verbose: bool,
    /// Log the state matrix after every round stage.
    #[arg(long, global = true)]
    trace: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct KeyArgs {
    /// AES-128 key as 32 hex characters.
    #[arg(long, value_name = "HEX")]
    key_hex: Option<String>,
    /// AES-128 key as exactly 16 bytes of text.
    #[arg(long, value_name = "TEXT")]
    key: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Ecb,
    Cbc,
}

impl From<ModeArg> for Mode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Ecb => Mode::Ecb,
            ModeArg::Cbc => Mode::Cbc,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Pad and encrypt a file into a ciphertext envelope.
    Enc {
        #[command(flatten)]
        key: KeyArgs,
        /// Chaining mode.
        #[arg(long, value_enum, default_value_t = ModeArg::Cbc)]
        mode: ModeArg,
        /// Plaintext input file.
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output envelope path.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
        /// Optional RNG seed for a reproducible IV.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Decrypt a ciphertext envelope back to plaintext.
    Dec {
        #[command(flatten)]
        key: KeyArgs,
        /// Envelope produced by `enc`.
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output plaintext path.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Print the 11 round keys derived from a key.
    Schedule {
        #[command(flatten)]
        key: KeyArgs,
    },
    /// Run the FIPS-197 and SP 800-38A known-answer vectors.
    Check,
    /// Encrypt "Two One Nine Two" under "Thats my Kung Fu" in both modes.
    Demo {
        /// Optional RNG seed for a reproducible IV.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.trace);
    match cli.command {
        Commands::Enc {
            key,
            mode,
            input,
            output,
            seed,
        } => cmd_enc(&key.resolve()?, mode.into(), &input, &output, seed, cli.trace),
        Commands::Dec { key, input, output } => {
            cmd_dec(&key.resolve()?, &input, &output, cli.trace)
        }
        Commands::Schedule { key } => cmd_schedule(&key.resolve()?),
        Commands::Check => cmd_check(),
        Commands::Demo { seed } => cmd_demo(seed, cli.trace),
    }
}

fn init_logging(verbose: bool, trace: bool) {
    let level = if trace {
        "trace"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

impl KeyArgs {
    fn resolve(&self) -> Result<Aes128Key> {
        match (&self.key_hex, &self.key) {
            (Some(hex_str), _) => parse_key_hex(hex_str),
            (None, Some(text)) => parse_key_text(text),
            (None, None) => bail!("a key is required (--key-hex or --key)"),
        }
    }
}

fn build_cipher(key: &Aes128Key, trace: bool) -> Cipher {
    let cipher = Cipher::from_key(key);
    if trace {
        cipher.with_observer(LogObserver)
    } else {
        cipher
    }
}

fn cmd_enc(
    key: &Aes128Key,
    mode: Mode,
    input_path: &Path,
    output_path: &Path,
    seed: Option<u64>,
    trace: bool,
) -> Result<()> {
    let cipher = build_cipher(key, trace);
    let data = fs::read(input_path).with_context(|| format!("read {}", input_path.display()))?;
    let mut rng = seeded_rng(seed);
    let sealed = cipher.encrypt_with_rng(&data, mode, &mut rng);
    if let Some(iv) = &sealed.iv {
        log::info!("iv: {}", hex::encode(iv));
    }
    let envelope = Envelope::new(mode, sealed);
    let bytes = envelope.to_bytes().context("serialize envelope")?;
    fs::write(output_path, bytes).with_context(|| format!("write {}", output_path.display()))?;
    Ok(())
}

fn cmd_dec(key: &Aes128Key, input_path: &Path, output_path: &Path, trace: bool) -> Result<()> {
    let envelope = load_envelope(input_path)?;
    if envelope.version != ENVELOPE_VERSION {
        bail!(
            "unsupported envelope version {} (expected {})",
            envelope.version,
            ENVELOPE_VERSION
        );
    }
    let cipher = build_cipher(key, trace);
    let plaintext = envelope.open(&cipher).context("decrypt envelope")?;
    fs::write(output_path, plaintext)
        .with_context(|| format!("write {}", output_path.display()))?;
    Ok(())
}

fn cmd_schedule(key: &Aes128Key) -> Result<()> {
    let round_keys = expand_key(key);
    for (round, round_key) in round_keys.iter().enumerate() {
        println!("round {:2}: {}", round, hex::encode(round_key));
    }
    Ok(())
}

struct BlockVector {
    name: &'static str,
    key: &'static str,
    plaintext: &'static str,
    ciphertext: &'static str,
}

const BLOCK_VECTORS: [BlockVector; 2] = [
    BlockVector {
        name: "FIPS-197 C.1",
        key: "000102030405060708090a0b0c0d0e0f",
        plaintext: "00112233445566778899aabbccddeeff",
        ciphertext: "69c4e0d86a7b0430d8cdb78070b4c55a",
    },
    BlockVector {
        name: "Thats my Kung Fu",
        key: "5468617473206d79204b756e67204675",
        plaintext: "54776f204f6e65204e696e652054776f",
        ciphertext: "29c3505f571420f6402299b31a02d73a",
    },
];

const CBC_KEY: &str = "2b7e151628aed2a6abf7158809cf4f3c";
const CBC_IV: &str = "000102030405060708090a0b0c0d0e0f";
const CBC_PLAIN: &str = "6bc1bee22e409f96e93d7e117393172aae2d8a571e03ac9c9eb76fac45af8e51";
const CBC_CIPHER: &str = "7649abac8119b246cee98e9b12e9197d5086cb9b507219ee95db113a917678b2";

fn cmd_check() -> Result<()> {
    for vector in &BLOCK_VECTORS {
        let round_keys = expand_key(&parse_key_hex(vector.key)?);
        let plaintext = decode_block(vector.plaintext)?;
        let ciphertext = decode_block(vector.ciphertext)?;
        if encrypt_block(&plaintext, &round_keys) != ciphertext {
            bail!("{}: encryption mismatch", vector.name);
        }
        if decrypt_block(&ciphertext, &round_keys) != plaintext {
            bail!("{}: decryption mismatch", vector.name);
        }
        println!("{}: ok", vector.name);
    }

    let round_keys = expand_key(&parse_key_hex(CBC_KEY)?);
    let iv = decode_block(CBC_IV)?;
    let mut data = hex::decode(CBC_PLAIN).context("decode CBC plaintext")?;
    aes_modes::cbc::encrypt_blocks(&mut data, &iv, &round_keys, &())
        .context("CBC-encrypt SP 800-38A plaintext")?;
    if hex::encode(&data) != CBC_CIPHER {
        bail!("SP 800-38A F.2.1: encryption mismatch");
    }
    aes_modes::cbc::decrypt_blocks(&mut data, &iv, &round_keys, &())
        .context("CBC-decrypt SP 800-38A ciphertext")?;
    if hex::encode(&data) != CBC_PLAIN {
        bail!("SP 800-38A F.2.1: decryption mismatch");
    }
    println!("SP 800-38A F.2.1: ok");
    Ok(())
}

fn cmd_demo(seed: Option<u64>, trace: bool) -> Result<()> {
    let key = parse_key_text("Thats my Kung Fu")?;
    let plaintext = b"Two One Nine Two";
    let cipher = build_cipher(&key, trace);
    let mut rng = seeded_rng(seed);

    println!("key: {}", hex::encode(key.0));
    println!("plaintext: {}", String::from_utf8_lossy(plaintext));

    let ecb = cipher.encrypt(plaintext, Mode::Ecb);
    let decrypted = cipher
        .decrypt(&ecb.ciphertext, Mode::Ecb, None)
        .context("ECB decrypt")?;
    println!("ECB ciphertext: {}", hex::encode(&ecb.ciphertext));
    println!("ECB decrypted: {}", String::from_utf8_lossy(&decrypted));
    if decrypted != plaintext {
        bail!("ECB roundtrip failed");
    }

    let cbc = cipher.encrypt_with_rng(plaintext, Mode::Cbc, &mut rng);
    let decrypted = cipher
        .decrypt(&cbc.ciphertext, Mode::Cbc, cbc.iv.as_ref())
        .context("CBC decrypt")?;
    if let Some(iv) = &cbc.iv {
        println!("CBC iv: {}", hex::encode(iv));
    }
    println!("CBC ciphertext: {}", hex::encode(&cbc.ciphertext));
    println!("CBC decrypted: {}", String::from_utf8_lossy(&decrypted));
    if decrypted != plaintext {
        bail!("CBC roundtrip failed");
    }
    Ok(())
}

fn parse_key_hex(hex_str: &str) -> Result<Aes128Key> {
    let bytes = hex::decode(hex_str.trim()).context("decode key hex")?;
    Aes128Key::try_from(bytes.as_slice())
        .context("AES-128 key must be 16 bytes (32 hex characters)")
}

fn parse_key_text(text: &str) -> Result<Aes128Key> {
    Aes128Key::try_from(text.as_bytes()).context("key text must be exactly 16 bytes")
}

fn decode_block(hex_str: &str) -> Result<[u8; 16]> {
    let bytes = hex::decode(hex_str).context("decode block hex")?;
    bytes
        .try_into()
        .map_err(|b: Vec<u8>| anyhow::anyhow!("block must be 16 bytes, got {}", b.len()))
}

fn load_envelope(path: &Path) -> Result<Envelope> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    Envelope::from_bytes(&bytes).context("deserialize envelope")
}

fn seeded_rng(seed: Option<u64>) -> impl RngCore + CryptoRng {
    match seed {
        Some(value) => {
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&value.to_le_bytes());
            ChaCha20Rng::from_seed(seed_bytes)
        }
        None => {
            let mut seed_bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut seed_bytes);
            ChaCha20Rng::from_seed(seed_bytes)
        }
    }
}
