//! The NLP oracle consumed by the transformation engines.
//!
//! Engines never talk to a tokenizer or tagger directly; they go through
//! [`NlpOracle`], which bundles tokenization, tagging, sentence splitting and
//! has-sense lookups. [`LexiconOracle`] is the implementation shipped with the
//! crate.
//!
//! [`LexiconOracle::bundled`] works offline with the rule tagger alone. An
//! oracle opened on a data directory also loads the nlprule tagging model; a
//! missing model is downloaded once by [`LexiconOracle::ensure_resources`].
//!
//! # Examples
//!
//! ```
//! use rephrase::analysis::oracle::{LexiconOracle, NlpOracle};
//!
//! let oracle = LexiconOracle::bundled().unwrap();
//! let tagged = oracle.analyze("John threw the ball.").unwrap();
//! assert_eq!(tagged[1].tag(), "VBD");
//! assert_eq!(oracle.split_sentences("One. Two.").unwrap().len(), 2);
//! ```

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use flate2::read::GzDecoder;
use log::{debug, info};

use crate::analysis::pos::CoarsePos;
use crate::analysis::sense::{BUNDLED_SENSES, SenseInventory, SenseLexicon};
use crate::analysis::tagger::Tagger;
use crate::analysis::tagger::model::ModelTagger;
use crate::analysis::tagger::rule::{BUNDLED_LEXICON, RuleTagger};
use crate::analysis::token::Token;
use crate::analysis::tokenizer::sentence::SentenceSplitter;
use crate::analysis::tokenizer::word::WordTokenizer;
use crate::error::{RephraseError, Result};

/// File name of the tagger lexicon inside a data directory.
pub const TAGGER_FILE: &str = "tagger.json";

/// File name of the sense table inside a data directory.
pub const SENSES_FILE: &str = "senses.json";

/// File name of the nlprule tagging model inside a data directory.
pub const MODEL_FILE: &str = "en_tokenizer.bin";

/// Where the gzipped English model is downloaded from.
pub const MODEL_URL: &str =
    "https://github.com/bminixhofer/nlprule/releases/download/0.6.4/en_tokenizer.bin.gz";

/// Tokenization, tagging, sentence splitting and sense lookups.
pub trait NlpOracle: Send + Sync {
    /// Split text into word and punctuation tokens.
    fn tokenize(&self, text: &str) -> Result<Vec<Token>>;

    /// Attach a part-of-speech tag to every token.
    fn tag(&self, tokens: Vec<Token>) -> Result<Vec<Token>>;

    /// Split text into sentences.
    fn split_sentences(&self, text: &str) -> Result<Vec<String>>;

    /// Whether `word` has any sense of the coarse class `pos`.
    fn has_sense(&self, word: &str, pos: CoarsePos) -> bool;

    /// Tokenize and tag in one step.
    fn analyze(&self, text: &str) -> Result<Vec<Token>> {
        let tokens = self.tokenize(text)?;
        self.tag(tokens)
    }
}

/// The default oracle: regex tokenizer, model or rule tagger, lexicon senses.
#[derive(Clone, Debug)]
pub struct LexiconOracle {
    tokenizer: WordTokenizer,
    splitter: SentenceSplitter,
    tagger: RuleTagger,
    model: Option<ModelTagger>,
    senses: SenseLexicon,
}

impl LexiconOracle {
    /// Assemble an oracle from its parts, tagging with the rule tagger.
    pub fn new(
        tokenizer: WordTokenizer,
        splitter: SentenceSplitter,
        tagger: RuleTagger,
        senses: SenseLexicon,
    ) -> Self {
        LexiconOracle {
            tokenizer,
            splitter,
            tagger,
            model: None,
            senses,
        }
    }

    /// Tag with `model` instead; the rule tagger stays as its fallback.
    pub fn with_model(mut self, model: ModelTagger) -> Self {
        self.model = Some(model);
        self
    }

    /// Oracle built from the resources compiled into the crate.
    pub fn bundled() -> Result<Self> {
        let tagger = RuleTagger::bundled()?;
        let senses = SenseLexicon::from_json(tagger.lexicon(), BUNDLED_SENSES)?;
        Ok(Self::new(
            WordTokenizer::new(),
            SentenceSplitter::new(),
            tagger,
            senses,
        ))
    }

    /// Load the oracle's data files and tagging model from `dir`.
    ///
    /// Missing files yield [`RephraseError::OracleUnavailable`]; call
    /// [`LexiconOracle::open`] to fetch them on demand instead.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let tagger_path = dir.join(TAGGER_FILE);
        let senses_path = dir.join(SENSES_FILE);
        let model_path = dir.join(MODEL_FILE);

        for path in [&tagger_path, &senses_path, &model_path] {
            if !path.is_file() {
                return Err(RephraseError::oracle_unavailable(format!(
                    "missing resource {}",
                    path.display()
                )));
            }
        }

        let tagger = RuleTagger::from_file(&tagger_path)?;
        let senses = SenseLexicon::from_file(tagger.lexicon(), &senses_path)?;
        let model = ModelTagger::from_file(&model_path, tagger.clone())?;
        debug!("Loaded NLP resources from {}", dir.display());

        Ok(Self::new(
            WordTokenizer::new(),
            SentenceSplitter::new(),
            tagger,
            senses,
        )
        .with_model(model))
    }

    /// Make sure `dir` holds every data file, fetching the model if needed.
    pub async fn ensure_resources<P: AsRef<Path>>(dir: P) -> Result<PathBuf> {
        Self::ensure_resources_from(dir, MODEL_URL).await
    }

    /// Like [`LexiconOracle::ensure_resources`], downloading from `model_url`.
    ///
    /// Existing files are left alone, so the download happens at most once
    /// per directory. Any failure is reported as
    /// [`RephraseError::OracleUnavailable`].
    pub async fn ensure_resources_from<P: AsRef<Path>>(
        dir: P,
        model_url: &str,
    ) -> Result<PathBuf> {
        let dir = dir.as_ref();
        let install = |name: &str, content: &str| -> Result<()> {
            let path = dir.join(name);
            if path.is_file() {
                return Ok(());
            }
            info!("Installing NLP resource {}", path.display());
            fs::create_dir_all(dir)
                .and_then(|_| fs::write(&path, content))
                .map_err(|e| {
                    RephraseError::oracle_unavailable(format!(
                        "failed to install {}: {e}",
                        path.display()
                    ))
                })
        };

        install(TAGGER_FILE, BUNDLED_LEXICON)?;
        install(SENSES_FILE, BUNDLED_SENSES)?;

        let model_path = dir.join(MODEL_FILE);
        if !model_path.is_file() {
            info!("Fetching tagging model from {model_url}");
            fetch_model(model_url, &model_path).await.map_err(|e| {
                RephraseError::oracle_unavailable(format!(
                    "failed to fetch {}: {e:#}",
                    model_path.display()
                ))
            })?;
        }
        Ok(dir.to_path_buf())
    }

    /// Load from `dir`, fetching missing resources first.
    pub async fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = Self::ensure_resources(dir).await?;
        Self::from_dir(dir)
    }

    pub fn tagger(&self) -> &RuleTagger {
        &self.tagger
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }
}

/// Download a gzipped model and move it to `path` once fully unpacked.
async fn fetch_model(url: &str, path: &Path) -> anyhow::Result<()> {
    let response = reqwest::get(url)
        .await
        .with_context(|| format!("could not reach {url}"))?
        .error_for_status()
        .context("download refused")?;
    let compressed = response.bytes().await.context("download interrupted")?;

    let mut model = Vec::new();
    GzDecoder::new(compressed.as_ref())
        .read_to_end(&mut model)
        .context("model archive is not valid gzip")?;

    let partial = path.with_extension("bin.part");
    fs::write(&partial, &model).with_context(|| format!("cannot write {}", partial.display()))?;
    if let Err(e) = fs::rename(&partial, path) {
        let _ = fs::remove_file(&partial);
        return Err(e).with_context(|| format!("cannot move model to {}", path.display()));
    }
    debug!("Fetched {} byte model into {}", model.len(), path.display());
    Ok(())
}

impl NlpOracle for LexiconOracle {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
        Ok(self.tokenizer.tokens(text))
    }

    fn tag(&self, tokens: Vec<Token>) -> Result<Vec<Token>> {
        match &self.model {
            Some(model) => model.tag(tokens),
            None => self.tagger.tag(tokens),
        }
    }

    fn split_sentences(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.splitter.split(text))
    }

    fn has_sense(&self, word: &str, pos: CoarsePos) -> bool {
        self.senses.has_sense(word, pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const UNREACHABLE: &str = "http://127.0.0.1:1/en_tokenizer.bin.gz";

    /// Serve `body` to every request, counting requests.
    async fn serve_bytes(body: Vec<u8>) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                counter.fetch_add(1, Ordering::SeqCst);
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let head = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/gzip\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    body.len()
                );
                socket.write_all(head.as_bytes()).await.ok();
                socket.write_all(&body).await.ok();
                socket.shutdown().await.ok();
            }
        });
        (format!("http://{addr}/en_tokenizer.bin.gz"), hits)
    }

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_bundled_oracle() {
        let oracle = LexiconOracle::bundled().unwrap();
        assert!(!oracle.has_model());
        let tokens = oracle.analyze("The ball was thrown by John.").unwrap();
        assert_eq!(tokens.len(), 7);
        assert_eq!(tokens[3].tag(), "VBN");
        assert!(oracle.has_sense("large", CoarsePos::Adj));
    }

    #[test]
    fn test_from_dir_missing_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let result = LexiconOracle::from_dir(dir.path());
        assert!(matches!(result, Err(RephraseError::OracleUnavailable(_))));
    }

    #[test]
    fn test_from_dir_requires_model() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(TAGGER_FILE), BUNDLED_LEXICON).unwrap();
        fs::write(dir.path().join(SENSES_FILE), BUNDLED_SENSES).unwrap();

        let result = LexiconOracle::from_dir(dir.path());
        assert!(matches!(result, Err(RephraseError::OracleUnavailable(msg)) if msg.contains(MODEL_FILE)));
    }

    #[tokio::test]
    async fn test_ensure_resources_fetches_model_once() {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("nlp");
        let (url, hits) = serve_bytes(gzip(b"model bytes")).await;

        LexiconOracle::ensure_resources_from(&data, &url).await.unwrap();
        assert!(data.join(TAGGER_FILE).is_file());
        assert!(data.join(SENSES_FILE).is_file());
        assert_eq!(fs::read(data.join(MODEL_FILE)).unwrap(), b"model bytes");
        assert!(!data.join("en_tokenizer.bin.part").exists());
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        // Present files are neither fetched nor overwritten again.
        fs::write(data.join(TAGGER_FILE), r#"{"zorp": "JJ"}"#).unwrap();
        LexiconOracle::ensure_resources_from(&data, UNREACHABLE).await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(
            RuleTagger::from_file(data.join(TAGGER_FILE)).unwrap().lexicon_tag("zorp"),
            Some("JJ")
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let result = LexiconOracle::ensure_resources_from(dir.path(), UNREACHABLE).await;
        assert!(matches!(result, Err(RephraseError::OracleUnavailable(_))));
        assert!(!dir.path().join(MODEL_FILE).exists());
    }

    #[tokio::test]
    async fn test_corrupt_archive_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let (url, _) = serve_bytes(b"not gzip at all".to_vec()).await;

        let result = LexiconOracle::ensure_resources_from(dir.path(), &url).await;
        assert!(matches!(result, Err(RephraseError::OracleUnavailable(msg)) if msg.contains("gzip")));
        assert!(!dir.path().join(MODEL_FILE).exists());
    }

    #[tokio::test]
    async fn test_install_failure_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "not a directory").unwrap();

        let result = LexiconOracle::ensure_resources_from(blocker.join("nlp"), UNREACHABLE).await;
        assert!(matches!(result, Err(RephraseError::OracleUnavailable(_))));
    }
}
