use crate::{automaton::MAX_CODE_POINT, regexp::Error};

/// The optional operators a pattern may use.
///
/// The core syntax of unions, concatenations, repetitions, classes, groups
/// and literals is always available. Each flag enables one additional
/// operator. [`SyntaxFlags::ALL`] is the default.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SyntaxFlags(u32);

impl SyntaxFlags {
    /// No optional operators.
    pub const NONE: SyntaxFlags = SyntaxFlags(0);
    /// Intersection, `&`.
    pub const INTERSECTION: SyntaxFlags = SyntaxFlags(0x0001);
    /// Complement, `~`.
    pub const COMPLEMENT: SyntaxFlags = SyntaxFlags(0x0002);
    /// The empty language, `#`.
    pub const EMPTY: SyntaxFlags = SyntaxFlags(0x0004);
    /// Any string, `@`.
    pub const ANYSTRING: SyntaxFlags = SyntaxFlags(0x0008);
    /// Named automata, `<name>`.
    pub const AUTOMATON: SyntaxFlags = SyntaxFlags(0x0010);
    /// Numeric intervals, `<n-m>`.
    pub const INTERVAL: SyntaxFlags = SyntaxFlags(0x0020);
    /// Every optional operator.
    pub const ALL: SyntaxFlags = SyntaxFlags(0x00FF);

    /// Returns the raw bits of these flags.
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Returns flags from raw bits. Unknown bits are kept but ignored.
    pub fn from_bits(bits: u32) -> SyntaxFlags {
        SyntaxFlags(bits)
    }

    /// Returns true if every flag in `other` is set in `self`.
    pub fn contains(self, other: SyntaxFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns these flags without the flags in `other`.
    pub fn without(self, other: SyntaxFlags) -> SyntaxFlags {
        SyntaxFlags(self.0 & !other.0)
    }
}

impl Default for SyntaxFlags {
    fn default() -> SyntaxFlags {
        SyntaxFlags::ALL
    }
}

impl std::ops::BitOr for SyntaxFlags {
    type Output = SyntaxFlags;

    fn bitor(self, rhs: SyntaxFlags) -> SyntaxFlags {
        SyntaxFlags(self.0 | rhs.0)
    }
}

/// A parsed regular expression.
///
/// Unions, concatenations and intersections are n-ary and never directly
/// contain a node of their own kind.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Node {
    /// `e1|e2|...`
    Union(Vec<Node>),
    /// `e1e2...`
    Concatenation(Vec<Node>),
    /// `e1&e2&...`
    Intersection(Vec<Node>),
    /// `e?`
    Optional(Box<Node>),
    /// `e*`
    Repeat(Box<Node>),
    /// `e+` (with a minimum of `1`) and `e{n,}`
    RepeatMin(Box<Node>, u32),
    /// `e{n}` and `e{n,m}`
    RepeatRange(Box<Node>, u32, u32),
    /// `~e`
    Complement(Box<Node>),
    /// A single character.
    Char(u32),
    /// A character class of inclusive codepoint ranges, as in `[a-z]`,
    /// `[^a-z]` or `\d`.
    Class { ranges: Vec<(u32, u32)>, negated: bool },
    /// `.`
    AnyChar,
    /// `#`
    Empty,
    /// `"..."`, or `()` for the empty string.
    String(String),
    /// `@`
    AnyString,
    /// `<name>`, with the byte offset of the name in the pattern.
    Named { name: String, offset: usize },
    /// `<min-max>`. When `digits > 0`, numbers are written with exactly
    /// that many digits.
    Interval { min: u32, max: u32, digits: usize },
}

impl Node {
    fn union(items: Vec<Node>) -> Node {
        flatten(items, |node| match node {
            Node::Union(inner) => Ok(inner),
            node => Err(node),
        }, Node::Union)
    }

    fn concatenation(items: Vec<Node>) -> Node {
        flatten(items, |node| match node {
            Node::Concatenation(inner) => Ok(inner),
            node => Err(node),
        }, Node::Concatenation)
    }

    fn intersection(items: Vec<Node>) -> Node {
        flatten(items, |node| match node {
            Node::Intersection(inner) => Ok(inner),
            node => Err(node),
        }, Node::Intersection)
    }

    /// Appends the names of every `<name>` reference to `names`.
    pub(crate) fn collect_names<'a>(&'a self, names: &mut Vec<&'a str>) {
        match *self {
            Node::Union(ref items)
            | Node::Concatenation(ref items)
            | Node::Intersection(ref items) => {
                for item in items.iter() {
                    item.collect_names(names);
                }
            }
            Node::Optional(ref e)
            | Node::Repeat(ref e)
            | Node::RepeatMin(ref e, _)
            | Node::RepeatRange(ref e, _, _)
            | Node::Complement(ref e) => e.collect_names(names),
            Node::Named { ref name, .. } => names.push(name),
            _ => {}
        }
    }
}

/// Builds an n-ary node from `items`, splicing in the children of any item
/// of the same kind. A single item is returned as is.
fn flatten(
    items: Vec<Node>,
    split: impl Fn(Node) -> Result<Vec<Node>, Node>,
    join: impl FnOnce(Vec<Node>) -> Node,
) -> Node {
    let mut flat = Vec::with_capacity(items.len());
    for item in items {
        match split(item) {
            Ok(inner) => flat.extend(inner),
            Err(item) => flat.push(item),
        }
    }
    if flat.len() == 1 {
        flat.swap_remove(0)
    } else {
        join(flat)
    }
}

/// A recursive descent parser for the pattern syntax.
///
/// ```text
/// union       ::= inter ( '|' inter )*
/// inter       ::= concat ( '&' concat )*                (INTERSECTION)
/// concat      ::= repeat+
/// repeat      ::= compl ( '?' | '*' | '+' | '{n}' | '{n,}' | '{n,m}' )*
/// compl       ::= '~' compl                             (COMPLEMENT)
///               | class
/// class       ::= '[' '^'? item+ ']' | simple
/// item        ::= predefined | char ( '-' char )?
/// simple      ::= '.' | '#' (EMPTY) | '@' (ANYSTRING)
///               | '"' <characters other than '"'> '"'
///               | '(' ')' | '(' union ')'
///               | '<' name '>' (AUTOMATON) | '<' n '-' m '>' (INTERVAL)
///               | predefined | char
/// predefined  ::= '\d' | '\D' | '\s' | '\S' | '\w' | '\W'
/// char        ::= <character> | '\' <character>
/// ```
pub(crate) struct Parser<'p> {
    pattern: &'p str,
    pos: usize,
    flags: SyntaxFlags,
    nest_limit: u32,
    depth: u32,
}

impl<'p> Parser<'p> {
    pub(crate) fn new(
        pattern: &'p str,
        flags: SyntaxFlags,
        nest_limit: u32,
    ) -> Parser<'p> {
        Parser { pattern, pos: 0, flags, nest_limit, depth: 0 }
    }

    pub(crate) fn parse(mut self) -> Result<Node, Error> {
        let node = self.parse_union()?;
        if self.more() {
            return Err(Error::syntax(self.pos, "end-of-string expected"));
        }
        Ok(node)
    }

    fn more(&self) -> bool {
        self.pos < self.pattern.len()
    }

    fn peek(&self) -> Option<char> {
        self.pattern[self.pos..].chars().next()
    }

    fn peek_is(&self, set: &str) -> bool {
        self.peek().map_or(false, |c| set.contains(c))
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn next_char(&mut self) -> Result<char, Error> {
        match self.peek() {
            None => Err(Error::syntax(self.pos, "unexpected end-of-string")),
            Some(c) => {
                self.pos += c.len_utf8();
                Ok(c)
            }
        }
    }

    fn check(&self, flag: SyntaxFlags) -> bool {
        self.flags.contains(flag)
    }

    fn nest(&mut self, offset: usize) -> Result<(), Error> {
        self.depth += 1;
        if self.depth > self.nest_limit {
            return Err(Error::nest_limit_exceeded(offset, self.nest_limit));
        }
        Ok(())
    }

    fn parse_union(&mut self) -> Result<Node, Error> {
        let mut items = vec![self.parse_inter()?];
        while self.eat('|') {
            items.push(self.parse_inter()?);
        }
        Ok(Node::union(items))
    }

    fn parse_inter(&mut self) -> Result<Node, Error> {
        let mut items = vec![self.parse_concat()?];
        while self.check(SyntaxFlags::INTERSECTION) && self.eat('&') {
            items.push(self.parse_concat()?);
        }
        Ok(Node::intersection(items))
    }

    fn parse_concat(&mut self) -> Result<Node, Error> {
        let mut items = vec![self.parse_repeat()?];
        while self.more()
            && !self.peek_is(")|")
            && !(self.check(SyntaxFlags::INTERSECTION) && self.peek_is("&"))
        {
            items.push(self.parse_repeat()?);
        }
        Ok(Node::concatenation(items))
    }

    fn parse_repeat(&mut self) -> Result<Node, Error> {
        let mut node = self.parse_compl()?;
        let depth = self.depth;
        while self.peek_is("?*+{") {
            let offset = self.pos;
            self.nest(offset)?;
            node = match self.next_char()? {
                '?' => Node::Optional(Box::new(node)),
                '*' => Node::Repeat(Box::new(node)),
                '+' => Node::RepeatMin(Box::new(node), 1),
                _ => {
                    let min = self.parse_integer()?;
                    let max = if self.eat(',') {
                        if self.peek().map_or(false, |c| c.is_ascii_digit()) {
                            Some(self.parse_integer()?)
                        } else {
                            None
                        }
                    } else {
                        Some(min)
                    };
                    if !self.eat('}') {
                        return Err(Error::syntax(self.pos, "expected '}'"));
                    }
                    match max {
                        None => Node::RepeatMin(Box::new(node), min),
                        Some(max) if min > max => {
                            return Err(Error::syntax(
                                offset,
                                format!(
                                    "invalid repetition range {{{},{}}}",
                                    min, max
                                ),
                            ));
                        }
                        Some(max) => Node::RepeatRange(Box::new(node), min, max),
                    }
                }
            };
        }
        self.depth = depth;
        Ok(node)
    }

    fn parse_integer(&mut self) -> Result<u32, Error> {
        let start = self.pos;
        let len = self.pattern.as_bytes()[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if len == 0 {
            return Err(Error::syntax(start, "integer expected"));
        }
        self.pos += len;
        self.pattern[start..self.pos]
            .parse()
            .map_err(|_| Error::syntax(start, "integer too large"))
    }

    fn parse_compl(&mut self) -> Result<Node, Error> {
        let offset = self.pos;
        if self.check(SyntaxFlags::COMPLEMENT) && self.eat('~') {
            self.nest(offset)?;
            let node = self.parse_compl()?;
            self.depth -= 1;
            return Ok(Node::Complement(Box::new(node)));
        }
        self.parse_class()
    }

    fn parse_class(&mut self) -> Result<Node, Error> {
        if !self.eat('[') {
            return self.parse_simple();
        }
        let negated = self.eat('^');
        let mut ranges = self.parse_class_item()?;
        while self.more() && !self.peek_is("]") {
            ranges.extend(self.parse_class_item()?);
        }
        if !self.eat(']') {
            return Err(Error::syntax(self.pos, "expected ']'"));
        }
        Ok(Node::Class { ranges, negated })
    }

    fn parse_class_item(&mut self) -> Result<Vec<(u32, u32)>, Error> {
        if let Some(ranges) = self.parse_predefined() {
            return Ok(ranges);
        }
        let offset = self.pos;
        let start = self.parse_char()?;
        if !self.eat('-') {
            return Ok(vec![(start as u32, start as u32)]);
        }
        let end = self.parse_char()?;
        if start > end {
            return Err(Error::syntax(
                offset,
                format!("invalid range {:?}-{:?}", start, end),
            ));
        }
        Ok(vec![(start as u32, end as u32)])
    }

    fn parse_simple(&mut self) -> Result<Node, Error> {
        let offset = self.pos;
        if self.eat('.') {
            return Ok(Node::AnyChar);
        }
        if self.check(SyntaxFlags::EMPTY) && self.eat('#') {
            return Ok(Node::Empty);
        }
        if self.check(SyntaxFlags::ANYSTRING) && self.eat('@') {
            return Ok(Node::AnyString);
        }
        if self.eat('"') {
            let rest = &self.pattern.as_bytes()[self.pos..];
            let end = match memchr::memchr(b'"', rest) {
                None => {
                    return Err(Error::syntax(self.pattern.len(), "expected '\"'"))
                }
                Some(i) => self.pos + i,
            };
            let literal = self.pattern[self.pos..end].to_string();
            self.pos = end + 1;
            return Ok(Node::String(literal));
        }
        if self.eat('(') {
            if self.eat(')') {
                return Ok(Node::String(String::new()));
            }
            self.nest(offset)?;
            let node = self.parse_union()?;
            if !self.eat(')') {
                return Err(Error::syntax(self.pos, "expected ')'"));
            }
            self.depth -= 1;
            return Ok(node);
        }
        if (self.check(SyntaxFlags::AUTOMATON)
            || self.check(SyntaxFlags::INTERVAL))
            && self.eat('<')
        {
            return self.parse_angle();
        }
        if let Some(ranges) = self.parse_predefined() {
            return Ok(Node::Class { ranges, negated: false });
        }
        Ok(Node::Char(self.parse_char()? as u32))
    }

    /// Parses the rest of `<name>` or `<min-max>` after the `<`.
    fn parse_angle(&mut self) -> Result<Node, Error> {
        let start = self.pos;
        let rest = &self.pattern.as_bytes()[start..];
        let end = match memchr::memchr(b'>', rest) {
            None => return Err(Error::syntax(self.pattern.len(), "expected '>'")),
            Some(i) => start + i,
        };
        let body = &self.pattern[start..end];
        self.pos = end + 1;
        let dash = match memchr::memchr(b'-', body.as_bytes()) {
            None => {
                if !self.check(SyntaxFlags::AUTOMATON) {
                    return Err(Error::syntax(start, "interval syntax error"));
                }
                return Ok(Node::Named { name: body.to_string(), offset: start });
            }
            Some(dash) => dash,
        };
        if !self.check(SyntaxFlags::INTERVAL) {
            return Err(Error::syntax(start, "interval syntax error"));
        }
        if let Some(extra) = memchr::memrchr(b'-', body.as_bytes())
            .filter(|&i| i != dash)
        {
            return Err(Error::syntax(start + extra, "interval syntax error"));
        }
        // Each bound is checked where it starts, so an empty bound is
        // reported at the '-' or '>' that follows it.
        let parse = |at: usize, s: &str| -> Result<u32, Error> {
            if s.is_empty() {
                return Err(Error::syntax(at, "integer expected"));
            }
            if let Some(i) = s.bytes().position(|b| !b.is_ascii_digit()) {
                return Err(Error::syntax(at + i, "interval syntax error"));
            }
            s.parse().map_err(|_| Error::syntax(at, "interval too large"))
        };
        let (smin, smax) = (&body[..dash], &body[dash + 1..]);
        let mut min = parse(start, smin)?;
        let mut max = parse(start + dash + 1, smax)?;
        let digits = if smin.len() == smax.len() { smin.len() } else { 0 };
        if min > max {
            std::mem::swap(&mut min, &mut max);
        }
        Ok(Node::Interval { min, max, digits })
    }

    /// Parses `\d`, `\D`, `\s`, `\S`, `\w` or `\W` into codepoint ranges.
    /// Leaves the position untouched for anything else.
    fn parse_predefined(&mut self) -> Option<Vec<(u32, u32)>> {
        let rest = &self.pattern.as_bytes()[self.pos..];
        if rest.len() < 2 || rest[0] != b'\\' {
            return None;
        }
        let ranges = match rest[1] {
            b'd' => DIGIT.to_vec(),
            b'D' => negate(DIGIT),
            b's' => SPACE.to_vec(),
            b'S' => negate(SPACE),
            b'w' => WORD.to_vec(),
            b'W' => negate(WORD),
            _ => return None,
        };
        self.pos += 2;
        Some(ranges)
    }

    fn parse_char(&mut self) -> Result<char, Error> {
        self.eat('\\');
        self.next_char()
    }
}

const DIGIT: &[(u32, u32)] = &[(0x30, 0x39)];
const SPACE: &[(u32, u32)] = &[(0x09, 0x0D), (0x20, 0x20)];
const WORD: &[(u32, u32)] =
    &[(0x30, 0x39), (0x41, 0x5A), (0x5F, 0x5F), (0x61, 0x7A)];

/// Returns the codepoint ranges not covered by `ranges`.
pub(crate) fn negate(ranges: &[(u32, u32)]) -> Vec<(u32, u32)> {
    let mut sorted = ranges.to_vec();
    sorted.sort_unstable();
    let mut gaps = vec![];
    let mut next = 0;
    for (min, max) in sorted {
        if min > next {
            gaps.push((next, min - 1));
        }
        next = next.max(max.saturating_add(1));
    }
    if next <= MAX_CODE_POINT {
        gaps.push((next, MAX_CODE_POINT));
    }
    gaps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(pattern: &str) -> Result<Node, Error> {
        Parser::new(pattern, SyntaxFlags::ALL, 250).parse()
    }

    fn parse_with(pattern: &str, flags: SyntaxFlags) -> Result<Node, Error> {
        Parser::new(pattern, flags, 250).parse()
    }

    fn c(ch: char) -> Node {
        Node::Char(ch as u32)
    }

    #[test]
    fn flattening() {
        assert_eq!(
            Node::Union(vec![c('a'), c('b'), c('c')]),
            parse("a|(b|c)").unwrap()
        );
        assert_eq!(
            Node::Concatenation(vec![c('a'), c('b'), c('c')]),
            parse("a(bc)").unwrap()
        );
        assert_eq!(
            Node::Intersection(vec![c('a'), c('b'), c('c')]),
            parse("(a&b)&c").unwrap()
        );
        assert_eq!(c('a'), parse("((a))").unwrap());
    }

    #[test]
    fn repetition() {
        assert_eq!(
            Node::RepeatRange(Box::new(c('a')), 2, 3),
            parse("a{2,3}").unwrap()
        );
        assert_eq!(
            Node::RepeatMin(Box::new(c('a')), 2),
            parse("a{2,}").unwrap()
        );
        assert_eq!(
            Node::RepeatRange(Box::new(c('a')), 4, 4),
            parse("a{4}").unwrap()
        );
        assert_eq!(
            Node::Optional(Box::new(Node::Repeat(Box::new(c('a'))))),
            parse("a*?").unwrap()
        );
    }

    #[test]
    fn classes() {
        assert_eq!(
            Node::Class {
                ranges: vec![(0x61, 0x7A), (0x30, 0x39), (0x5F, 0x5F)],
                negated: true,
            },
            parse("[^a-z\\d_]").unwrap()
        );
        assert_eq!(
            Node::Class { ranges: vec![(0x5D, 0x5D)], negated: false },
            parse("[]]").unwrap()
        );
        assert_eq!(
            Node::Class { ranges: SPACE.to_vec(), negated: false },
            parse("\\s").unwrap()
        );
        assert_eq!(c('.'), parse("\\.").unwrap());
    }

    #[test]
    fn literals_and_specials() {
        assert_eq!(Node::String("a|b".to_string()), parse("\"a|b\"").unwrap());
        assert_eq!(Node::String(String::new()), parse("()").unwrap());
        assert_eq!(Node::Empty, parse("#").unwrap());
        assert_eq!(Node::AnyString, parse("@").unwrap());
        assert_eq!(
            Node::Interval { min: 5, max: 10, digits: 2 },
            parse("<10-05>").unwrap()
        );
        assert_eq!(
            Node::Interval { min: 1, max: 100, digits: 0 },
            parse("<1-100>").unwrap()
        );
        assert_eq!(
            Node::Named { name: "foo".to_string(), offset: 1 },
            parse("<foo>").unwrap()
        );
    }

    #[test]
    fn flags_disable_operators() {
        let flags = SyntaxFlags::NONE;
        assert_eq!(
            Node::Concatenation(vec![c('a'), c('&'), c('b')]),
            parse_with("a&b", flags).unwrap()
        );
        assert_eq!(c('#'), parse_with("#", flags).unwrap());
        assert_eq!(
            Node::Concatenation(vec![c('~'), c('a')]),
            parse_with("~a", flags).unwrap()
        );
        let no_named = SyntaxFlags::ALL.without(SyntaxFlags::AUTOMATON);
        assert!(parse_with("<foo>", no_named).is_err());
        assert!(parse_with("<1-2>", no_named).is_ok());
    }

    #[test]
    fn error_offsets() {
        assert_eq!(Some(3), parse("ab(").unwrap_err().offset());
        assert_eq!(Some(3), parse("(ab").unwrap_err().offset());
        assert_eq!(Some(1), parse("a)").unwrap_err().offset());
        assert_eq!(Some(2), parse("a{x}").unwrap_err().offset());
        assert_eq!(Some(5), parse("a{2,3").unwrap_err().offset());
        assert_eq!(Some(1), parse("a{3,2}").unwrap_err().offset());
        assert_eq!(Some(1), parse("[z-a]").unwrap_err().offset());
        assert_eq!(Some(4), parse("\"abc").unwrap_err().offset());
        assert_eq!(Some(4), parse("<1-2-3>").unwrap_err().offset());
        assert_eq!(Some(1), parse("<-5>").unwrap_err().offset());
        assert_eq!(Some(3), parse("<1->").unwrap_err().offset());
        assert_eq!(Some(5), parse("<12-3x>").unwrap_err().offset());
        assert_eq!(Some(4), parse("ab<1x-3>").unwrap_err().offset());
        assert_eq!(
            Some(3),
            parse("<1-99999999999>").unwrap_err().offset()
        );
        assert_eq!(Some(2), parse("a|").unwrap_err().offset());
        // Offsets count bytes, not characters.
        assert_eq!(Some(3), parse("☃)").unwrap_err().offset());
    }

    #[test]
    fn nest_limit() {
        let deep = format!("{}a{}", "(".repeat(10), ")".repeat(10));
        assert!(Parser::new(&deep, SyntaxFlags::ALL, 10).parse().is_ok());
        assert!(Parser::new(&deep, SyntaxFlags::ALL, 9).parse().is_err());
        assert!(Parser::new("a**", SyntaxFlags::ALL, 1).parse().is_err());
        assert!(Parser::new("~~a", SyntaxFlags::ALL, 1).parse().is_err());
        // Sibling groups do not nest.
        assert!(Parser::new("(a)(b)(c)", SyntaxFlags::ALL, 1).parse().is_ok());
    }

    #[test]
    fn negation() {
        assert_eq!(vec![(0, 0x2F), (0x3A, MAX_CODE_POINT)], negate(DIGIT));
        assert_eq!(
            vec![(0, 0x60), (0x7B, MAX_CODE_POINT)],
            negate(&[(0x61, 0x7A), (0x62, 0x63)])
        );
        assert!(negate(&[(0, MAX_CODE_POINT)]).is_empty());
    }
}
