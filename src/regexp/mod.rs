/*!
A regular expression syntax that compiles to [`Automaton`]s.

The syntax is small. Every construct maps directly onto an
operation in [`operations`](crate::operations) or a constructor in
[`automata`](crate::automata). In particular there are no anchors, no
captures and no lazy or possessive repetition, since a pattern always
describes a whole term. In exchange, the syntax supports intersection
(`&`), complement (`~`), the empty language (`#`), any string (`@`), named
automata (`<name>`) and numeric intervals (`<n-m>`). Each of these may be
disabled with [`SyntaxFlags`].

| Syntax | Matches |
|--------|---------|
| `x`, `\x` | the character `x` |
| `.` | any character |
| `[a-z0-9]`, `[^a-z]` | a character (not) in the class |
| `\d \s \w`, `\D \S \W` | digits, whitespace, word characters and their negations |
| `"..."` | the literal string between the quotes |
| `()` | the empty string |
| `e?`, `e*`, `e+` | zero or one, zero or more, one or more |
| `e{n}`, `e{n,}`, `e{n,m}` | bounded repetition |
| `e1e2`, `e1\|e2`, `e1&e2` | concatenation, union, intersection |
| `~e` | every string not matched by `e` |
| `#`, `@` | no string, every string |
| `<name>` | the automaton named `name` |
| `<n-m>` | the decimal numbers from `n` to `m` |

# Example

```
use term_automata::{operations, regexp::RegExp};

let re = RegExp::new("ab+|~(.*c)").unwrap();
let a = re.to_automaton().unwrap();
assert!(operations::run(&a, "abbb"));
assert!(operations::run(&a, "xyz"));
assert!(!operations::run(&a, "xyzc"));
```
*/

use std::collections::HashMap;
use std::hash::BuildHasher;

use crate::{
    automata,
    automaton::Automaton,
    operations::{self, DEFAULT_DETERMINIZE_WORK_LIMIT},
    util::case_folding,
};

pub use self::{
    error::Error,
    parse::{Node, SyntaxFlags},
};

mod error;
mod parse;

/// The default nesting limit. See [`Config::nest_limit`].
pub const DEFAULT_NEST_LIMIT: u32 = 250;

/// A source of automata for `<name>` references.
pub trait AutomatonProvider {
    /// Returns the automaton with the given name, if there is one.
    fn automaton(&self, name: &str) -> Option<Automaton>;
}

impl<S: BuildHasher> AutomatonProvider for HashMap<String, Automaton, S> {
    fn automaton(&self, name: &str) -> Option<Automaton> {
        self.get(name).cloned()
    }
}

impl<'a, P: AutomatonProvider + ?Sized> AutomatonProvider for &'a P {
    fn automaton(&self, name: &str) -> Option<Automaton> {
        (**self).automaton(name)
    }
}

/// The configuration used to parse and compile a regular expression.
#[derive(Clone, Copy, Debug, Default)]
pub struct Config {
    syntax: Option<SyntaxFlags>,
    case_insensitive: Option<bool>,
    determinize_work_limit: Option<usize>,
    nest_limit: Option<u32>,
}

impl Config {
    /// Return a new default configuration.
    pub fn new() -> Config {
        Config::default()
    }

    /// The optional operators to recognize. Disabled operators are parsed
    /// as literal characters. All are enabled by default.
    pub fn syntax(mut self, flags: SyntaxFlags) -> Config {
        self.syntax = Some(flags);
        self
    }

    /// Whether characters, strings and classes also match their simple
    /// case folding alternates. This is disabled by default.
    pub fn case_insensitive(mut self, yes: bool) -> Config {
        self.case_insensitive = Some(yes);
        self
    }

    /// The effort limit for determinizing the operand of a complement.
    /// The default is [`DEFAULT_DETERMINIZE_WORK_LIMIT`].
    pub fn determinize_work_limit(mut self, limit: usize) -> Config {
        self.determinize_work_limit = Some(limit);
        self
    }

    /// The maximum depth of nested groups, complements and repetition
    /// operators. Parsing fails beyond it. The default is
    /// [`DEFAULT_NEST_LIMIT`].
    pub fn nest_limit(mut self, limit: u32) -> Config {
        self.nest_limit = Some(limit);
        self
    }

    /// Returns the recognized operators.
    pub fn get_syntax(&self) -> SyntaxFlags {
        self.syntax.unwrap_or(SyntaxFlags::ALL)
    }

    /// Returns whether matching is case insensitive.
    pub fn get_case_insensitive(&self) -> bool {
        self.case_insensitive.unwrap_or(false)
    }

    /// Returns the determinization effort limit.
    pub fn get_determinize_work_limit(&self) -> usize {
        self.determinize_work_limit.unwrap_or(DEFAULT_DETERMINIZE_WORK_LIMIT)
    }

    /// Returns the nesting limit.
    pub fn get_nest_limit(&self) -> u32 {
        self.nest_limit.unwrap_or(DEFAULT_NEST_LIMIT)
    }

    /// Overwrite the default configuration such that the options in `o` are
    /// always used. If an option in `o` is not set, then the corresponding
    /// option in `self` is used. If it's not set in `self` either, then it
    /// remains not set.
    fn overwrite(self, o: Config) -> Config {
        Config {
            syntax: o.syntax.or(self.syntax),
            case_insensitive: o.case_insensitive.or(self.case_insensitive),
            determinize_work_limit: o
                .determinize_work_limit
                .or(self.determinize_work_limit),
            nest_limit: o.nest_limit.or(self.nest_limit),
        }
    }
}

/// A builder for regular expressions.
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

    /// Parse the given pattern.
    pub fn build(&self, pattern: &str) -> Result<RegExp, Error> {
        let node = parse::Parser::new(
            pattern,
            self.config.get_syntax(),
            self.config.get_nest_limit(),
        )
        .parse()?;
        trace!("parsed {:?} into {:?}", pattern, node);
        Ok(RegExp { pattern: pattern.to_string(), node, config: self.config })
    }
}

/// A parsed regular expression.
#[derive(Clone, Debug)]
pub struct RegExp {
    pattern: String,
    node: Node,
    config: Config,
}

impl RegExp {
    /// Parse a pattern with the default configuration.
    pub fn new(pattern: &str) -> Result<RegExp, Error> {
        RegExp::builder().build(pattern)
    }

    /// Return a default configuration.
    pub fn config() -> Config {
        Config::new()
    }

    /// Return a builder for configuring how a pattern is parsed and
    /// compiled.
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Returns the pattern this was parsed from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the parsed syntax tree.
    pub fn node(&self) -> &Node {
        &self.node
    }

    /// Returns the names referenced by `<name>`, in order of appearance and
    /// without duplicates.
    pub fn identifiers(&self) -> Vec<&str> {
        let mut names = vec![];
        self.node.collect_names(&mut names);
        let mut seen = std::collections::HashSet::new();
        names.retain(|name| seen.insert(*name));
        names
    }

    /// Compiles this expression to an automaton.
    ///
    /// The result is generally not deterministic. A `<name>` reference fails
    /// with an error, since there is no provider to resolve it.
    pub fn to_automaton(&self) -> Result<Automaton, Error> {
        self.compile(None)
    }

    /// Compiles this expression to an automaton, resolving `<name>`
    /// references with `provider`.
    pub fn to_automaton_with_provider(
        &self,
        provider: &dyn AutomatonProvider,
    ) -> Result<Automaton, Error> {
        self.compile(Some(provider))
    }

    fn compile(
        &self,
        provider: Option<&dyn AutomatonProvider>,
    ) -> Result<Automaton, Error> {
        let compiler = Compiler {
            pattern: &self.pattern,
            provider,
            case_insensitive: self.config.get_case_insensitive(),
            work_limit: self.config.get_determinize_work_limit(),
        };
        let a = compiler.compile(&self.node)?;
        debug!(
            "compiled {:?} into automaton with {} states",
            self.pattern,
            a.num_states()
        );
        Ok(a)
    }
}

struct Compiler<'a> {
    pattern: &'a str,
    provider: Option<&'a dyn AutomatonProvider>,
    case_insensitive: bool,
    work_limit: usize,
}

impl<'a> Compiler<'a> {
    fn compile(&self, node: &Node) -> Result<Automaton, Error> {
        Ok(match *node {
            Node::Union(ref items) => {
                operations::union(&self.compile_all(items)?)
            }
            Node::Concatenation(ref items) => {
                operations::concatenate(&self.compile_all(items)?)
            }
            Node::Intersection(ref items) => {
                let mut compiled = self.compile_all(items)?.into_iter();
                let first = match compiled.next() {
                    None => return Ok(automata::make_any_string()),
                    Some(first) => first,
                };
                compiled.fold(first, |acc, a| operations::intersection(&acc, &a))
            }
            Node::Optional(ref e) => operations::optional(&self.compile(e)?),
            Node::Repeat(ref e) => operations::repeat(&self.compile(e)?),
            Node::RepeatMin(ref e, min) => {
                operations::repeat_min(&self.compile(e)?, min as usize)
            }
            Node::RepeatRange(ref e, min, max) => operations::repeat_range(
                &self.compile(e)?,
                min as usize,
                max as usize,
            ),
            Node::Complement(ref e) => {
                operations::complement(&self.compile(e)?, self.work_limit)
                    .map_err(|err| Error::too_complex(err, self.pattern))?
            }
            Node::Char(c) => self.char(c),
            Node::Class { ref ranges, negated } => self.class(ranges, negated),
            Node::AnyChar => automata::make_any_char(),
            Node::Empty => automata::make_empty(),
            Node::String(ref s) => {
                if self.case_insensitive {
                    let chars: Vec<Automaton> =
                        s.chars().map(|c| self.char(c as u32)).collect();
                    operations::concatenate(&chars)
                } else {
                    automata::make_string(s)
                }
            }
            Node::AnyString => automata::make_any_string(),
            Node::Named { ref name, offset } => self
                .provider
                .and_then(|provider| provider.automaton(name))
                .ok_or_else(|| Error::unknown_automaton(offset, name))?,
            Node::Interval { min, max, digits } => {
                automata::make_decimal_interval(min, max, digits)
            }
        })
    }

    fn compile_all(&self, nodes: &[Node]) -> Result<Vec<Automaton>, Error> {
        nodes.iter().map(|node| self.compile(node)).collect()
    }

    fn char(&self, c: u32) -> Automaton {
        if !self.case_insensitive {
            return automata::make_char(c);
        }
        let mut labels = case_folding::alternates(c);
        labels.push(c);
        automata::make_char_set(&labels)
    }

    fn class(&self, ranges: &[(u32, u32)], negated: bool) -> Automaton {
        let mut ranges = if self.case_insensitive {
            case_folding::fold_ranges(ranges)
        } else {
            ranges.to_vec()
        };
        if negated {
            ranges = parse::negate(&ranges);
        }
        let mut a = Automaton::new();
        let start = a.create_state();
        let end = a.create_state();
        a.set_accept(end, true);
        for (min, max) in ranges {
            a.add_transition(start, end, min, max);
        }
        a.finish_state();
        a
    }
}
