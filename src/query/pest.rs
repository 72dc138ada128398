use pest::Parser;
use pest_derive::Parser;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

#[derive(Parser)]
#[grammar = "query/grammar.pest"]
struct QueryPairs;

pub(crate) struct Query {
    _private: (),
}

pub(crate) type Pair<'a> = pest::iterators::Pair<'a, Rule>;
pub(crate) type Pairs<'a> = pest::iterators::Pairs<'a, Rule>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Error {
    pub(crate) pest_error: Arc<pest::error::Error<Rule>>,
}

impl Error {
    pub(crate) fn new_from_span(span: pest::Span, message: String) -> Self {
        Self {
            pest_error: Arc::new(pest::error::Error::new_from_span(
                pest::error::ErrorVariant::CustomError { message },
                span,
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.pest_error, f)
    }
}

impl std::error::Error for Error {}

impl From<pest::error::Error<Rule>> for Error {
    fn from(value: pest::error::Error<Rule>) -> Self {
        Self {
            pest_error: Arc::new(value),
        }
    }
}

impl Query {
    pub(crate) fn parse(query_text: &str) -> Result<Pairs<'_>, Error> {
        QueryPairs::parse(Rule::top, query_text).map_err(Self::format_err)
    }

    fn format_err(err: pest::error::Error<Rule>) -> Error {
        let renamed = err.renamed_rules(|err| {
            match err {
                Rule::EOI => "end of input",
                Rule::top => "position",
                Rule::relative => "relative position",
                Rule::relative_prefix => "_:c_",
                Rule::relative_sign => "_+_ or _-_",
                Rule::forward => "_+_",
                Rule::backward => "_-_",
                Rule::relative_magnitude => "line offset",
                Rule::absolute | Rule::line => "line number",
                Rule::column => "column number",
            }
            .to_string()
            .replace('_', "\"")
        });
        Error {
            pest_error: Arc::new(renamed),
        }
    }
}
