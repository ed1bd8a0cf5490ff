/*!
Automata compiled for matching against a sorted term dictionary.

A [`CompiledAutomaton`] classifies an automaton into one of a few shapes
(see [`AutomatonType`]) so that common cases like "match nothing", "match
everything" or "match this one term" never pay for running an automaton.
Everything else is converted to bytes and run either with a fully
determinized [`ByteRunAutomaton`] or, when determinizing would be too
expensive, a lazily determinized [`NFARunAutomaton`].

# Example

```
use term_automata::{automata, compiled::{AutomatonType, CompiledAutomaton}};

let a = automata::make_string_union(&["bar", "baz", "foo"]);
let c = CompiledAutomaton::new(&a);
assert_eq!(AutomatonType::Normal, c.kind());
assert!(c.run(b"baz"));
assert_eq!(Some(b"baz".to_vec()), c.floor(b"bb"));
assert_eq!(None, c.floor(b"a"));
```
*/

use crate::{
    automaton::{
        Automaton, Transition, TransitionAccessor, MAX_BYTE, MAX_CODE_POINT,
    },
    operations::{self, DEFAULT_DETERMINIZE_WORK_LIMIT},
    run::{ByteRunAutomaton, ByteRunnable, NFARunAutomaton},
    utf8::Utf32ToUtf8,
};

/// The shape of a compiled automaton.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AutomatonType {
    /// Accepts no terms.
    None,
    /// Accepts every term.
    All,
    /// Accepts exactly one term.
    Single,
    /// Anything else. Terms are matched by running an automaton.
    Normal,
}

/// The configuration used to compile an automaton.
#[derive(Clone, Copy, Debug, Default)]
pub struct Config {
    simplify: Option<bool>,
    binary: Option<bool>,
    finite: Option<Option<bool>>,
    determinize_work_limit: Option<Option<usize>>,
}

impl Config {
    /// Return a new default configuration.
    pub fn new() -> Config {
        Config::default()
    }

    /// Whether to detect the `None`, `All` and `Single` shapes.
    ///
    /// When disabled, every automaton is compiled as
    /// [`AutomatonType::Normal`]. This is enabled by default.
    pub fn simplify(mut self, yes: bool) -> Config {
        self.simplify = Some(yes);
        self
    }

    /// Whether the automaton's labels are bytes rather than codepoints.
    ///
    /// A binary automaton is run as is. Otherwise it is converted to UTF-8
    /// first. This is disabled by default.
    pub fn binary(mut self, yes: bool) -> Config {
        self.binary = Some(yes);
        self
    }

    /// Whether the automaton's language is known to be finite.
    ///
    /// When `None` (the default), finiteness is computed.
    pub fn finite(mut self, finite: Option<bool>) -> Config {
        self.finite = Some(finite);
        self
    }

    /// The effort limit for determinizing the byte automaton.
    ///
    /// When the byte automaton is not deterministic and cannot be
    /// determinized within this limit, a lazily determinized run automaton
    /// is used instead. When `None`, determinization is never attempted.
    /// The default is
    /// [`DEFAULT_DETERMINIZE_WORK_LIMIT`](crate::operations::DEFAULT_DETERMINIZE_WORK_LIMIT).
    pub fn determinize_work_limit(mut self, limit: Option<usize>) -> Config {
        self.determinize_work_limit = Some(limit);
        self
    }

    /// Returns whether the special shapes are detected.
    pub fn get_simplify(&self) -> bool {
        self.simplify.unwrap_or(true)
    }

    /// Returns whether labels are bytes.
    pub fn get_binary(&self) -> bool {
        self.binary.unwrap_or(false)
    }

    /// Returns the known finiteness, if any.
    pub fn get_finite(&self) -> Option<bool> {
        self.finite.unwrap_or(None)
    }

    /// Returns the determinization effort limit, if any.
    pub fn get_determinize_work_limit(&self) -> Option<usize> {
        self.determinize_work_limit
            .unwrap_or(Some(DEFAULT_DETERMINIZE_WORK_LIMIT))
    }

    /// Overwrite the default configuration such that the options in `o` are
    /// always used. If an option in `o` is not set, then the corresponding
    /// option in `self` is used. If it's not set in `self` either, then it
    /// remains not set.
    pub(crate) fn overwrite(self, o: Config) -> Config {
        Config {
            simplify: o.simplify.or(self.simplify),
            binary: o.binary.or(self.binary),
            finite: o.finite.or(self.finite),
            determinize_work_limit: o
                .determinize_work_limit
                .or(self.determinize_work_limit),
        }
    }
}

/// A builder for compiled automata.
#[derive(Clone, Debug, Default)]
pub struct Builder {
    config: Config,
}

impl Builder {
    /// Create a new builder with the default configuration.
    pub fn new() -> Builder {
        Builder::default()
    }

    /// Apply the given configuration options to this builder.
    pub fn configure(&mut self, config: Config) -> &mut Builder {
        self.config = self.config.overwrite(config);
        self
    }

    /// Compile the given automaton.
    pub fn build(&self, a: &Automaton) -> CompiledAutomaton {
        let binary = self.config.get_binary();
        let simplify = self.config.get_simplify();
        if simplify {
            if let Some(c) = self.simplify(a, binary) {
                debug!("compiled automaton as {:?}", c.kind);
                return c;
            }
        }
        // Surrogates have no UTF-8 encoding, so paths through them die in
        // the byte automaton.
        let live = operations::remove_dead_states(a);
        let bytes = if binary {
            live
        } else {
            operations::remove_dead_states(&Utf32ToUtf8::new().convert(&live))
        };
        if simplify && !binary {
            if let Some(c) = simplify_bytes(&bytes) {
                debug!("compiled UTF-8 automaton as {:?}", c.kind);
                return c;
            }
        }
        self.build_normal(bytes, binary)
    }

    fn simplify(
        &self,
        a: &Automaton,
        binary: bool,
    ) -> Option<CompiledAutomaton> {
        if operations::is_empty(a) {
            return Some(CompiledAutomaton::special(
                AutomatonType::None,
                binary,
            ));
        }
        let max = if binary { MAX_BYTE } else { MAX_CODE_POINT };
        if operations::is_total_range(a, 0, max) {
            return Some(CompiledAutomaton::special(
                AutomatonType::All,
                binary,
            ));
        }
        let live = operations::remove_dead_states(a);
        if !live.is_deterministic() {
            return None;
        }
        let labels = operations::singleton(&live)?;
        let term = if binary {
            labels
                .iter()
                .map(|&label| u8::try_from(label).ok())
                .collect::<Option<Vec<u8>>>()?
        } else {
            labels
                .iter()
                .map(|&label| char::from_u32(label))
                .collect::<Option<String>>()?
                .into_bytes()
        };
        let mut c = CompiledAutomaton::special(AutomatonType::Single, binary);
        c.term = Some(term);
        Some(c)
    }

    /// Builds a run automaton over `bytes`, which must have no dead states.
    fn build_normal(&self, bytes: Automaton, binary: bool) -> CompiledAutomaton {
        let finite = match self.config.get_finite() {
            Some(finite) => finite,
            None => operations::is_finite(&bytes),
        };
        let common_suffix = if finite || bytes.num_states() == 0 {
            None
        } else {
            Some(operations::common_suffix_bytes(&bytes))
                .filter(|suffix| !suffix.is_empty())
        };

        let limit = if bytes.is_deterministic() {
            Some(DEFAULT_DETERMINIZE_WORK_LIMIT)
        } else {
            self.config.get_determinize_work_limit()
        };
        let runner = match limit {
            None => Runner::Nfa(NFARunAutomaton::new(&bytes, MAX_BYTE + 1)),
            Some(limit) => match ByteRunAutomaton::new(&bytes, true, limit) {
                Ok(run) => Runner::Dfa(run),
                Err(_err) => {
                    debug!("falling back to lazy NFA run automaton: {}", _err);
                    Runner::Nfa(NFARunAutomaton::new(&bytes, MAX_BYTE + 1))
                }
            },
        };
        let sink_state = match runner {
            Runner::Dfa(ref run) => find_sink_state(run.automaton()),
            Runner::Nfa(_) => None,
        };
        debug!(
            "compiled automaton as Normal (finite: {}, suffix: {:?}, {})",
            finite,
            common_suffix,
            match runner {
                Runner::Dfa(ref run) => format!("DFA with {} states", run.size()),
                Runner::Nfa(_) => "lazy NFA".to_string(),
            }
        );
        CompiledAutomaton {
            kind: AutomatonType::Normal,
            binary,
            term: None,
            runner: Some(runner),
            common_suffix,
            finite: Some(finite),
            sink_state,
        }
    }
}

/// Detects the shapes that only show up once surrogates are dropped from a
/// codepoint automaton: an empty byte language, or a single term.
fn simplify_bytes(bytes: &Automaton) -> Option<CompiledAutomaton> {
    if bytes.num_states() == 0 {
        return Some(CompiledAutomaton::special(AutomatonType::None, false));
    }
    if !bytes.is_deterministic() {
        return None;
    }
    let term = operations::singleton(bytes)?
        .iter()
        .map(|&label| u8::try_from(label).ok())
        .collect::<Option<Vec<u8>>>()?;
    let mut c = CompiledAutomaton::special(AutomatonType::Single, false);
    c.term = Some(term);
    Some(c)
}

/// An automaton prepared for matching terms of a term dictionary.
///
/// Terms are byte strings: UTF-8 encoded text unless the automaton was
/// compiled as binary.
///
/// A compiled automaton using the lazy NFA strategy is not `Sync`. Each
/// thread should use its own clone.
#[derive(Clone, Debug)]
pub struct CompiledAutomaton {
    kind: AutomatonType,
    binary: bool,
    term: Option<Vec<u8>>,
    runner: Option<Runner>,
    common_suffix: Option<Vec<u8>>,
    finite: Option<bool>,
    sink_state: Option<usize>,
}

#[derive(Clone, Debug)]
enum Runner {
    Dfa(ByteRunAutomaton),
    Nfa(NFARunAutomaton),
}

impl CompiledAutomaton {
    /// Compile a codepoint automaton with the default configuration.
    pub fn new(a: &Automaton) -> CompiledAutomaton {
        Builder::new().build(a)
    }

    /// Return a default configuration for compiling automata.
    pub fn config() -> Config {
        Config::new()
    }

    /// Return a builder for compiling automata.
    pub fn builder() -> Builder {
        Builder::new()
    }

    fn special(kind: AutomatonType, binary: bool) -> CompiledAutomaton {
        CompiledAutomaton {
            kind,
            binary,
            term: None,
            runner: None,
            common_suffix: None,
            finite: None,
            sink_state: None,
        }
    }

    /// Returns the shape of this automaton.
    pub fn kind(&self) -> AutomatonType {
        self.kind
    }

    /// Returns true if labels are bytes rather than codepoints.
    pub fn is_binary(&self) -> bool {
        self.binary
    }

    /// For [`AutomatonType::Single`], returns the single accepted term.
    pub fn term(&self) -> Option<&[u8]> {
        self.term.as_deref()
    }

    /// For [`AutomatonType::Normal`] automata with an infinite language,
    /// returns the non-empty suffix shared by every accepted term, if any.
    pub fn common_suffix(&self) -> Option<&[u8]> {
        self.common_suffix.as_deref()
    }

    /// For [`AutomatonType::Normal`], returns whether the language is
    /// finite.
    pub fn is_finite(&self) -> Option<bool> {
        self.finite
    }

    /// Returns an accepting state whose transitions loop back to itself on
    /// every byte, if the fully determinized automaton has one.
    ///
    /// Once a term reaches this state, every extension of it is accepted.
    pub fn sink_state(&self) -> Option<usize> {
        self.sink_state
    }

    /// Returns the run automaton for [`AutomatonType::Normal`].
    pub fn byte_runnable(&self) -> Option<&dyn ByteRunnable> {
        match self.runner {
            Some(Runner::Dfa(ref run)) => Some(run),
            Some(Runner::Nfa(ref run)) => Some(run),
            None => None,
        }
    }

    /// Returns the transitions of the run automaton for
    /// [`AutomatonType::Normal`]. Its states are those of
    /// [`CompiledAutomaton::byte_runnable`].
    pub fn transition_accessor(&self) -> Option<&dyn TransitionAccessor> {
        match self.runner {
            Some(Runner::Dfa(ref run)) => Some(run.automaton()),
            Some(Runner::Nfa(ref run)) => Some(run),
            None => None,
        }
    }

    /// Returns true if `term` is accepted.
    pub fn run(&self, term: &[u8]) -> bool {
        match self.kind {
            AutomatonType::None => false,
            AutomatonType::All => {
                self.binary || std::str::from_utf8(term).is_ok()
            }
            AutomatonType::Single => self.term.as_deref() == Some(term),
            AutomatonType::Normal => match self.runner {
                Some(Runner::Dfa(ref run)) => run.run(term),
                Some(Runner::Nfa(ref run)) => ByteRunnable::run(run, term),
                None => false,
            },
        }
    }

    /// Returns the greatest accepted term that is less than or equal to
    /// `probe` in byte order.
    ///
    /// Returns `None` if no accepted term is `<= probe`, or if the accepted
    /// terms below `probe` have no greatest element. The latter happens
    /// when they form an infinite ascending chain, like `a`, `aa`, `aaa`
    /// and so on below the probe `b`.
    pub fn floor(&self, probe: &[u8]) -> Option<Vec<u8>> {
        match self.kind {
            AutomatonType::None => None,
            AutomatonType::All => {
                // Below an invalid UTF-8 probe, there is always a longer
                // valid term.
                if self.binary || std::str::from_utf8(probe).is_ok() {
                    Some(probe.to_vec())
                } else {
                    None
                }
            }
            AutomatonType::Single => {
                self.term.as_ref().filter(|t| t.as_slice() <= probe).cloned()
            }
            AutomatonType::Normal => match self.runner {
                Some(Runner::Dfa(ref run)) => {
                    if run.automaton().num_states() == 0 {
                        return None;
                    }
                    floor(run, run.automaton(), probe)
                }
                Some(Runner::Nfa(ref run)) => floor(run, run, probe),
                None => None,
            },
        }
    }

    /// Returns every term of `set` accepted by this automaton, in order.
    #[cfg(feature = "transducer")]
    pub fn terms<D: AsRef<[u8]>>(&self, set: &fst::Set<D>) -> Vec<Vec<u8>> {
        use fst::{IntoStreamer, Streamer};

        let mut stream = set.search(self).into_stream();
        let mut terms = vec![];
        while let Some(term) = stream.next() {
            terms.push(term.to_vec());
        }
        terms
    }
}

/// Finds the greatest term `<= probe` accepted by `run`, whose transitions
/// are given by `acc`.
///
/// Every state must be able to reach an accepting state.
fn floor<R, A>(run: &R, acc: &A, probe: &[u8]) -> Option<Vec<u8>>
where
    R: ByteRunnable + ?Sized,
    A: TransitionAccessor + ?Sized,
{
    let mut state = 0;
    if probe.is_empty() {
        return if run.is_accept(state) { Some(vec![]) } else { None };
    }
    let mut stack = vec![];
    let mut idx = 0;
    let mut t = Transition::new();
    loop {
        let mut label = probe[idx];
        let mut next = run.step(state, label);
        if idx == probe.len() - 1 {
            if let Some(s) = next {
                if run.is_accept(s) {
                    return Some(probe.to_vec());
                }
            }
            next = None;
        }
        match next {
            Some(s) => {
                stack.push(state);
                state = s;
                idx += 1;
            }
            None => {
                // Back up to the deepest prefix that either is a term or
                // can continue with a label below the probe's.
                loop {
                    if acc.init_transition(state, &mut t) > 0 {
                        acc.next_transition(&mut t);
                        if t.min < label as u32 {
                            break;
                        }
                    }
                    if run.is_accept(state) {
                        return Some(probe[..idx].to_vec());
                    }
                    state = stack.pop()?;
                    idx -= 1;
                    label = probe[idx];
                }
                return add_tail(run, acc, state, probe[..idx].to_vec(), label);
            }
        }
    }
}

/// Extends `term` with the greatest label below `lead` leaving `state`,
/// followed by the greatest possible tail.
fn add_tail<R, A>(
    run: &R,
    acc: &A,
    mut state: usize,
    mut term: Vec<u8>,
    lead: u8,
) -> Option<Vec<u8>>
where
    R: ByteRunnable + ?Sized,
    A: TransitionAccessor + ?Sized,
{
    let lead = lead as u32;
    let mut t = Transition::new();
    let count = acc.init_transition(state, &mut t);
    let mut max_index = 0;
    for i in 0..count {
        acc.next_transition(&mut t);
        if t.min < lead {
            max_index = i;
        } else {
            break;
        }
    }
    acc.transition(state, max_index, &mut t);
    term.push(t.max.min(lead - 1) as u8);
    state = t.dest;

    let mut seen = vec![];
    loop {
        if seen.len() < run.size() {
            seen.resize(run.size(), false);
        }
        if seen[state] {
            return None;
        }
        seen[state] = true;
        let count = acc.num_transitions(state);
        if count == 0 {
            debug_assert!(run.is_accept(state));
            return Some(term);
        }
        acc.transition(state, count - 1, &mut t);
        term.push(t.max as u8);
        state = t.dest;
    }
}

fn find_sink_state(a: &Automaton) -> Option<usize> {
    a.accept_states().find(|&s| {
        a.transitions(s)
            .any(|t| t.dest == s && t.min == 0 && t.max == MAX_BYTE)
    })
}

#[cfg(feature = "transducer")]
impl fst::Automaton for CompiledAutomaton {
    /// For `Single`, the number of bytes of the term matched so far.
    /// Otherwise, the state of the run automaton. `None` is dead.
    type State = Option<usize>;

    fn start(&self) -> Option<usize> {
        match self.kind {
            AutomatonType::None => None,
            _ => Some(0),
        }
    }

    fn is_match(&self, state: &Option<usize>) -> bool {
        let s = match *state {
            None => return false,
            Some(s) => s,
        };
        match self.kind {
            AutomatonType::None => false,
            AutomatonType::All => true,
            AutomatonType::Single => {
                self.term.as_ref().map_or(false, |t| t.len() == s)
            }
            AutomatonType::Normal => {
                self.byte_runnable().map_or(false, |run| run.is_accept(s))
            }
        }
    }

    fn accept(&self, state: &Option<usize>, byte: u8) -> Option<usize> {
        let s = (*state)?;
        match self.kind {
            AutomatonType::None => None,
            AutomatonType::All => Some(s),
            AutomatonType::Single => {
                let term = self.term.as_ref()?;
                if term.get(s) == Some(&byte) {
                    Some(s + 1)
                } else {
                    None
                }
            }
            AutomatonType::Normal => self.byte_runnable()?.step(s, byte),
        }
    }

    fn can_match(&self, state: &Option<usize>) -> bool {
        state.is_some()
    }

    fn will_always_match(&self, state: &Option<usize>) -> bool {
        match self.kind {
            AutomatonType::All => true,
            AutomatonType::Normal => {
                state.is_some() && *state == self.sink_state
            }
            _ => false,
        }
    }
}
