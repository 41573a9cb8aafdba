//! The option program
//!
//! A [`Program`] collects option declarations through chained builder calls,
//! parses a command line against them and then offers the input collectors.

use crate::collect::{self, Collected, Done, Pending};
use crate::config::{Manifest, Settings};
use crate::error::{CollectError, CollectResult, Result};
use crate::events::Events;
use crate::parser::{self, ParsedResult};
use crate::registry::{IntoDecl, OptionDef, OptionType, Registry};
use clap_complete::Shell;
use std::io::{self, Write};
use std::path::Path;
use std::rc::Rc;
use tokio::io::AsyncRead;
use tracing::debug;

/// What the caller should do after parsing
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Parsing finished normally
    Continue(ParsedResult),

    /// `--help` or `--version` was handled; exit with this status
    Terminate(i32),
}

impl Outcome {
    /// Exit the process on `Terminate`, otherwise hand back the parsed result
    pub fn or_exit(self) -> ParsedResult {
        match self {
            Outcome::Continue(parsed) => parsed,
            Outcome::Terminate(code) => std::process::exit(code),
        }
    }
}

/// Parse progress. Collector requests made before parsing wait in `pending`.
enum ParseState {
    Unparsed { pending: Vec<Pending> },
    Parsed(ParsedResult),
}

/// Option declarations plus parse state and input collectors
pub struct Program {
    /// Arguments parsed by `parse()`, binary name first
    args: Vec<String>,

    /// Name shown in usage output
    name: String,

    version: Option<String>,
    registry: Registry,
    events: Events,
    state: ParseState,

    /// Standard input unless replaced; opened on first read
    input: Option<Box<dyn AsyncRead + Unpin>>,
    output: Box<dyn Write>,
}

fn default_input() -> Box<dyn AsyncRead + Unpin> {
    Box::new(tokio::io::stdin())
}

/// Base name of the binary path in `args[0]`
fn program_name(args: &[String]) -> String {
    args.first()
        .and_then(|arg0| Path::new(arg0).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl Program {
    /// Create a program parsing `args` (binary name first)
    pub fn new(args: Vec<String>) -> Self {
        Self::with_settings(args, Settings::default())
    }

    /// Create a program parsing the process arguments
    pub fn from_env() -> Self {
        Self::new(std::env::args().collect())
    }

    /// Create a program with explicit settings
    pub fn with_settings(args: Vec<String>, settings: Settings) -> Self {
        let name = settings.program.unwrap_or_else(|| program_name(&args));

        Program {
            args,
            name,
            version: None,
            registry: Registry::new(),
            events: Events::new(),
            state: ParseState::Unparsed {
                pending: Vec::new(),
            },
            input: None,
            output: Box::new(io::stdout()),
        }
        .option("help", ("-h", "Show help usage", OptionType::Boolean))
        .option("version", ("-v", "Show package version", OptionType::Boolean))
    }

    /// Create a program from a manifest
    pub fn from_manifest(args: Vec<String>, manifest: Manifest) -> Result<Self> {
        let mut program = Self::with_settings(args, manifest.settings);
        program.version = manifest.version;

        for option in &manifest.options {
            program.registry.insert(option.to_def()?);
        }

        Ok(program.shorthands(manifest.shorthands))
    }

    /// Declare an option. See [`IntoDecl`] for the accepted forms.
    pub fn option(mut self, name: &str, decl: impl IntoDecl) -> Self {
        let decl = decl.into_decl();
        self.registry
            .insert(OptionDef::new(name, &decl.shorthand, &decl.description, decl.ty));
        self
    }

    /// Set the version printed by `--version`
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Add one entry to the shorthand table shown in help
    pub fn shorthand(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.registry.add_shorthand(key.into(), value.into());
        self
    }

    /// Add several entries to the shorthand table shown in help
    pub fn shorthands<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in entries {
            self.registry.add_shorthand(key.into(), value.into());
        }
        self
    }

    /// Read input from `input` instead of the process standard input
    pub fn with_input<R: AsyncRead + Unpin + 'static>(mut self, input: R) -> Self {
        self.input = Some(Box::new(input));
        self
    }

    /// Write help and version output to `output` instead of standard output
    pub fn with_output<W: Write + 'static>(mut self, output: W) -> Self {
        self.output = Box::new(output);
        self
    }

    /// Run after the help block has been written, before terminating
    pub fn on_help<F>(mut self, listener: F) -> Self
    where
        F: FnMut(&mut dyn Write) -> io::Result<()> + 'static,
    {
        self.events.help.push(Box::new(listener));
        self
    }

    /// Failure while reading standard input or a file
    pub fn on_error<F: FnMut(&CollectError) + 'static>(mut self, listener: F) -> Self {
        self.events.error.push(Box::new(listener));
        self
    }

    /// Full standard input text, once the stream has ended
    pub fn on_stdin<F: FnMut(&str) + 'static>(mut self, listener: F) -> Self {
        self.events.stdin.push(Box::new(listener));
        self
    }

    /// Each decoded chunk of standard input as it arrives
    pub fn on_stdin_data<F: FnMut(&str) + 'static>(mut self, listener: F) -> Self {
        self.events.stdin_data.push(Box::new(listener));
        self
    }

    /// Concatenated file contents and the list of files read
    pub fn on_files<F: FnMut(&str, &[String]) + 'static>(mut self, listener: F) -> Self {
        self.events.files.push(Box::new(listener));
        self
    }

    /// Contents of each file as it is read
    pub fn on_files_data<F: FnMut(&str) + 'static>(mut self, listener: F) -> Self {
        self.events.files_data.push(Box::new(listener));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get_version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Result of the last successful parse
    pub fn parsed(&self) -> Option<&ParsedResult> {
        match &self.state {
            ParseState::Parsed(parsed) => Some(parsed),
            ParseState::Unparsed { .. } => None,
        }
    }

    /// The help block as text
    pub fn render_help(&self) -> String {
        parser::render_help(&self.name, &self.registry)
    }

    /// Write the help block to the output
    pub fn help(&mut self) -> Result<()> {
        let text = self.render_help();
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }

    /// Write a completion script for `shell` covering the declared options
    pub fn completions(&self, shell: Shell, out: &mut dyn Write) {
        let mut cmd = parser::build_command(&self.name, &self.registry);
        clap_complete::generate(shell, &mut cmd, self.name.clone(), out);
    }

    /// Parse the arguments given at construction
    pub async fn parse(&mut self) -> Result<Outcome> {
        let argv = self.args.clone();
        self.parse_from(argv).await
    }

    /// Parse `argv` (binary name first).
    ///
    /// `--version` and `--help` write their output and return
    /// [`Outcome::Terminate`] without touching the parse state. Otherwise the
    /// result replaces any earlier one and collector requests made before
    /// parsing run now.
    pub async fn parse_from<I, T>(&mut self, argv: I) -> Result<Outcome>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.registry.validate()?;

        let argv: Vec<String> = argv.into_iter().map(Into::into).collect();
        let parsed = parser::parse_args(&self.name, &self.registry, argv)?;

        if parsed.flag("version") {
            writeln!(self.output, "{}", self.version.as_deref().unwrap_or_default())?;
            self.output.flush()?;
            return Ok(Outcome::Terminate(0));
        }

        if parsed.flag("help") {
            self.help()?;
            self.events.emit_help(&mut *self.output)?;
            self.output.flush()?;
            return Ok(Outcome::Terminate(0));
        }

        debug!(remain = ?parsed.remain, "parsed command line");

        let previous = std::mem::replace(&mut self.state, ParseState::Parsed(parsed.clone()));
        if let ParseState::Unparsed { pending } = previous {
            self.replay(pending).await;
        }

        Ok(Outcome::Continue(parsed))
    }

    /// Run the collector requests made before parsing.
    ///
    /// Requests of one kind share a single read. A read also happens when
    /// only listeners asked for the data.
    async fn replay(&mut self, pending: Vec<Pending>) {
        let remain = self.remain();
        let mut stdin_waiters = Vec::new();
        let mut file_waiters = Vec::new();

        for request in pending {
            match request {
                Pending::Stdin { force, done } if remain.is_empty() || force => {
                    stdin_waiters.push(done)
                }
                Pending::Files { done } if !remain.is_empty() => file_waiters.push(done),
                _ => debug!("collector request not applicable, dropped"),
            }
        }

        if !stdin_waiters.is_empty() || (remain.is_empty() && self.events.wants_stdin()) {
            let result = self.read_stdin().await;
            deliver(stdin_waiters, result);
        }

        if !remain.is_empty() && (!file_waiters.is_empty() || self.events.wants_files()) {
            let result = collect::read_files(&remain, &mut self.events).await;
            deliver(file_waiters, result);
        }
    }

    fn remain(&self) -> Vec<String> {
        self.parsed()
            .map(|parsed| parsed.remain.clone())
            .unwrap_or_default()
    }

    async fn read_stdin(&mut self) -> CollectResult<Collected> {
        let input = self.input.get_or_insert_with(default_input);
        collect::read_stream(input, &mut self.events).await
    }

    /// Read standard input when no positional arguments were given, or when
    /// `force` is set. Before parsing, the request waits for `parse()`.
    pub async fn stdin<F>(&mut self, force: bool, done: F) -> &mut Self
    where
        F: FnOnce(CollectResult<Collected>) + 'static,
    {
        let should_read = match &mut self.state {
            ParseState::Unparsed { pending } => {
                debug!("standard input requested before parse, deferring");
                pending.push(Pending::Stdin {
                    force,
                    done: Box::new(done),
                });
                return self;
            }
            ParseState::Parsed(parsed) => parsed.remain.is_empty() || force,
        };

        if should_read {
            let result = self.read_stdin().await;
            done(result);
        }

        self
    }

    /// Read and concatenate the files named by the positional arguments.
    /// Nothing happens when there are none. Before parsing, the request
    /// waits for `parse()`.
    pub async fn files<F>(&mut self, done: F) -> &mut Self
    where
        F: FnOnce(CollectResult<Collected>) + 'static,
    {
        let remain = match &mut self.state {
            ParseState::Unparsed { pending } => {
                debug!("files requested before parse, deferring");
                pending.push(Pending::Files {
                    done: Box::new(done),
                });
                return self;
            }
            ParseState::Parsed(parsed) => parsed.remain.clone(),
        };

        if !remain.is_empty() {
            let result = collect::read_files(&remain, &mut self.events).await;
            done(result);
        }

        self
    }

    /// `stdin` and `files` with the same callback; whichever applies calls it
    pub async fn collect<F>(&mut self, done: F) -> &mut Self
    where
        F: Fn(CollectResult<Collected>) + 'static,
    {
        let done = Rc::new(done);
        let on_files = Rc::clone(&done);

        self.stdin(false, move |result| done(result)).await;
        self.files(move |result| on_files(result)).await
    }
}

fn deliver(waiters: Vec<Done>, result: CollectResult<Collected>) {
    for done in waiters {
        done(result.clone());
    }
}
