use crate::sheet::{Construct, GlobalAtRule, MediaBlock, SelectorRule, Stylesheet};
use cssparser::{Delimiter, ParseError, Parser, ParserInput, Token};

const CHARSET: &str = "charset";
const MEDIA: &str = "media";

/// What the next top-level item looks like, judged from its first token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Charset,
    Media,
    AtRule,
    Rule,
}

/// Split stylesheet text into its top-level constructs.
///
/// Never fails: anything that is not a charset directive, a media block or a
/// selector rule comes back as an opaque [`SelectorRule`] with no selectors.
/// `@charset` is only the global at-rule when it is the first construct.
pub fn parse_stylesheet(src: &str) -> Stylesheet<'_> {
    let mut input = ParserInput::new(src);
    let mut parser = Parser::new(&mut input);
    let mut constructs = Vec::new();

    let trailing = loop {
        let start = parser.position();
        parser.skip_whitespace();
        if parser.is_exhausted() {
            break parser.slice_from(start);
        }
        let leading = parser.slice_from(start);

        let construct = match peek_kind(&mut parser) {
            Kind::Charset if constructs.is_empty() => {
                Construct::Global(parse_charset(&mut parser, leading))
            }
            Kind::Media => parse_media(&mut parser, leading),
            Kind::Charset | Kind::AtRule => Construct::Rule(parse_at_rule(&mut parser, leading)),
            Kind::Rule => Construct::Rule(parse_rule(&mut parser, leading)),
        };
        constructs.push(construct);
    };

    log::trace!("tokenized {} top-level constructs", constructs.len());

    Stylesheet {
        constructs,
        trailing,
        line_ending: if src.contains("\r\n") { "\r\n" } else { "\n" },
    }
}

/// Split a selector list on the commas that are not inside brackets, strings
/// or comments. Empty entries are dropped.
pub fn split_selectors(prelude: &str) -> Vec<&str> {
    let mut input = ParserInput::new(prelude);
    let mut parser = Parser::new(&mut input);
    selector_list(&mut parser)
}

fn peek_kind(parser: &mut Parser<'_, '_>) -> Kind {
    let state = parser.state();
    let kind = match parser.next_including_whitespace_and_comments() {
        Ok(Token::AtKeyword(name)) if name.eq_ignore_ascii_case(CHARSET) => Kind::Charset,
        Ok(Token::AtKeyword(name)) if name.eq_ignore_ascii_case(MEDIA) => Kind::Media,
        Ok(Token::AtKeyword(_)) => Kind::AtRule,
        _ => Kind::Rule,
    };
    parser.reset(&state);
    kind
}

/// Consume every remaining token and return the trimmed text they span.
fn source_text<'i>(parser: &mut Parser<'i, '_>) -> Result<&'i str, ParseError<'i, ()>> {
    let start = parser.position();
    while parser.next_including_whitespace_and_comments().is_ok() {}
    Ok(parser.slice_from(start).trim())
}

fn selector_list<'i>(parser: &mut Parser<'i, '_>) -> Vec<&'i str> {
    let mut selectors = Vec::new();
    loop {
        let selector = parser
            .parse_until_before(Delimiter::Comma, |p| source_text(p))
            .unwrap_or_default();
        if !selector.is_empty() {
            selectors.push(selector);
        }
        // The comma, or the end of the list.
        if parser.next().is_err() {
            return selectors;
        }
    }
}

fn parse_charset<'i>(parser: &mut Parser<'i, '_>, leading: &'i str) -> GlobalAtRule<'i> {
    let start = parser.position();
    let _ = parser.parse_until_after(Delimiter::Semicolon, |p| source_text(p));
    GlobalAtRule {
        leading,
        text: parser.slice_from(start),
    }
}

fn parse_media<'i>(parser: &mut Parser<'i, '_>, leading: &'i str) -> Construct<'i> {
    let start = parser.position();
    let _ = parser.next_including_whitespace_and_comments();
    let condition_start = parser.position();
    let _ = parser.parse_until_before(Delimiter::CurlyBracketBlock | Delimiter::Semicolon, |p| {
        source_text(p)
    });
    let condition_end = parser.position();

    if !matches!(
        parser.next_including_whitespace_and_comments(),
        Ok(Token::CurlyBracketBlock)
    ) {
        // `@media print;` or a prelude running to the end: nothing to split.
        return Construct::Rule(opaque(leading, parser.slice_from(start)));
    }
    let open = parser.slice_from(start);
    let condition = parser.slice(condition_start..condition_end).trim();

    let nested = parser.parse_nested_block(|block| {
        let mut rules = Vec::new();
        loop {
            let rule_start = block.position();
            block.skip_whitespace();
            if block.is_exhausted() {
                return Ok::<_, ParseError<'i, ()>>((rules, rule_start));
            }
            let inner_leading = block.slice_from(rule_start);
            let rule = match peek_kind(block) {
                Kind::Rule => parse_rule(block, inner_leading),
                Kind::Charset | Kind::Media | Kind::AtRule => parse_at_rule(block, inner_leading),
            };
            rules.push(rule);
        }
    });
    let (rules, close_start) = match nested {
        Ok(nested) => nested,
        Err(_) => (Vec::new(), parser.position()),
    };

    Construct::Media(MediaBlock {
        leading,
        open,
        condition,
        rules,
        // Trivia after the last inner rule, plus the `}` the nested parse consumed.
        close: parser.slice_from(close_start),
    })
}

/// Any at-rule other than the ones handled above: runs to its `;` or through
/// its block.
fn parse_at_rule<'i>(parser: &mut Parser<'i, '_>, leading: &'i str) -> SelectorRule<'i> {
    let start = parser.position();
    let _ = parser.parse_until_after(Delimiter::Semicolon | Delimiter::CurlyBracketBlock, |p| {
        source_text(p)
    });
    opaque(leading, parser.slice_from(start))
}

fn parse_rule<'i>(parser: &mut Parser<'i, '_>, leading: &'i str) -> SelectorRule<'i> {
    let start = parser.position();
    let selectors = parser
        .parse_until_before(Delimiter::CurlyBracketBlock | Delimiter::Semicolon, |p| {
            Ok::<_, ParseError<'i, ()>>(selector_list(p))
        })
        .unwrap_or_default();

    let has_block = matches!(
        parser.next_including_whitespace_and_comments(),
        Ok(Token::CurlyBracketBlock)
    );
    if !has_block {
        return opaque(leading, parser.slice_from(start));
    }

    let _ = parser.parse_nested_block(|p| source_text(p));
    SelectorRule {
        leading,
        text: parser.slice_from(start),
        selectors,
    }
}

fn opaque<'i>(leading: &'i str, text: &'i str) -> SelectorRule<'i> {
    SelectorRule {
        leading,
        text,
        selectors: Vec::new(),
    }
}
