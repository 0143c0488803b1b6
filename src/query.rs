//! Structured content queries.
//!
//! Queries are built from typed parts — filter predicates, a projection
//! field list, an optional sort, and a slice — and rendered to GROQ text
//! just before the request goes out. Keeping them structured (rather than
//! opaque strings) means the three fixed queries the site runs can be
//! validated and unit-tested without any transport.
//!
//! The site runs exactly three queries:
//! - [`events`]: every event with a routable slug, newest first
//! - [`articles`]: every article with a routable slug, newest first
//! - [`article_by_slug`]: one article matching the `$slug` parameter, with
//!   defaults coalesced and references dereferenced
//!
//! Ordering among records with equal `date` values is whatever the store
//! returns — it is not specified and tests must not depend on it.

/// A single filter predicate, combined with `&&` inside `*[...]`.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `_type == "<name>"`
    TypeIs(&'static str),
    /// `defined(<field>)`
    Defined(&'static str),
    /// `<field> == $<param>` — the parameter is bound at fetch time.
    EqParam(&'static str, &'static str),
}

/// One projected field inside `{...}`.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// `<field>`
    Field(&'static str),
    /// `...` — every field of the record.
    Spread,
    /// `"<alias>": coalesce(<field>, <fallback>)` — default-value coalescing
    /// done by the store, so the record arrives with the field present.
    Coalesce {
        alias: &'static str,
        field: &'static str,
        fallback: &'static str,
    },
    /// `<field>->` — dereference when the field is a reference rather than
    /// an inline value.
    Deref(&'static str),
}

/// Sort direction for [`Order`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Direction {
    Asc,
    Desc,
}

/// `|order(<field> <dir>)`, applied after the projection.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub field: &'static str,
    pub direction: Direction,
}

/// How many matches to take.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Slice {
    /// Every match, as a list.
    All,
    /// `[0]` — the first match or null.
    First,
}

/// A read-only content query: filter + projection + sort + slice.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub projection: Vec<Projection>,
    pub order: Option<Order>,
    pub slice: Slice,
}

impl Query {
    /// Render to GROQ text for the query endpoint.
    pub fn to_groq(&self) -> String {
        let filter = self
            .filters
            .iter()
            .map(Filter::render)
            .collect::<Vec<_>>()
            .join(" && ");

        let projection = self
            .projection
            .iter()
            .map(Projection::render)
            .collect::<Vec<_>>()
            .join(", ");

        let mut groq = format!("*[{filter}]");
        if self.slice == Slice::First {
            groq.push_str("[0]");
        }
        groq.push('{');
        groq.push_str(&projection);
        groq.push('}');
        if let Some(order) = &self.order {
            let dir = match order.direction {
                Direction::Asc => "asc",
                Direction::Desc => "desc",
            };
            groq.push_str(&format!("|order({} {})", order.field, dir));
        }
        groq
    }
}

impl Filter {
    fn render(&self) -> String {
        match self {
            Filter::TypeIs(name) => format!("_type == \"{name}\""),
            Filter::Defined(field) => format!("defined({field})"),
            Filter::EqParam(field, param) => format!("{field} == ${param}"),
        }
    }
}

impl Projection {
    fn render(&self) -> String {
        match self {
            Projection::Field(name) => (*name).to_string(),
            Projection::Spread => "...".to_string(),
            Projection::Coalesce {
                alias,
                field,
                fallback,
            } => format!("\"{alias}\": coalesce({field}, {fallback})"),
            Projection::Deref(field) => format!("{field}->"),
        }
    }
}

/// All events with a routable slug, newest first.
pub fn events() -> Query {
    Query {
        filters: vec![Filter::TypeIs("event"), Filter::Defined("slug.current")],
        projection: vec![
            Projection::Field("_id"),
            Projection::Field("name"),
            Projection::Field("slug"),
            Projection::Field("date"),
        ],
        order: Some(Order {
            field: "date",
            direction: Direction::Desc,
        }),
        slice: Slice::All,
    }
}

/// All articles with a routable slug, newest first.
pub fn articles() -> Query {
    Query {
        filters: vec![Filter::TypeIs("article"), Filter::Defined("slug.current")],
        projection: vec![
            Projection::Field("_id"),
            Projection::Field("title"),
            Projection::Field("slug"),
            Projection::Field("date"),
            Projection::Field("image"),
        ],
        order: Some(Order {
            field: "date",
            direction: Direction::Desc,
        }),
        slice: Slice::All,
    }
}

/// The first article whose slug equals the `$slug` parameter, with every
/// field, store-side defaults for `date`/`doorsOpen`, and `author`/`date`
/// dereferenced when they are references.
pub fn article_by_slug() -> Query {
    Query {
        filters: vec![
            Filter::TypeIs("article"),
            Filter::EqParam("slug.current", "slug"),
        ],
        projection: vec![
            Projection::Spread,
            Projection::Coalesce {
                alias: "date",
                field: "date",
                fallback: "now()",
            },
            Projection::Coalesce {
                alias: "doorsOpen",
                field: "doorsOpen",
                fallback: "0",
            },
            Projection::Deref("author"),
            Projection::Deref("date"),
        ],
        order: None,
        slice: Slice::First,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_query_renders_expected_groq() {
        assert_eq!(
            events().to_groq(),
            "*[_type == \"event\" && defined(slug.current)]\
             {_id, name, slug, date}|order(date desc)"
        );
    }

    #[test]
    fn articles_query_renders_expected_groq() {
        assert_eq!(
            articles().to_groq(),
            "*[_type == \"article\" && defined(slug.current)]\
             {_id, title, slug, date, image}|order(date desc)"
        );
    }

    #[test]
    fn article_by_slug_renders_expected_groq() {
        assert_eq!(
            article_by_slug().to_groq(),
            "*[_type == \"article\" && slug.current == $slug][0]\
             {..., \"date\": coalesce(date, now()), \
             \"doorsOpen\": coalesce(doorsOpen, 0), author->, date->}"
        );
    }

    #[test]
    fn first_slice_precedes_projection() {
        let q = Query {
            filters: vec![Filter::TypeIs("article")],
            projection: vec![Projection::Field("_id")],
            order: None,
            slice: Slice::First,
        };
        assert_eq!(q.to_groq(), "*[_type == \"article\"][0]{_id}");
    }

    #[test]
    fn order_follows_projection() {
        let q = Query {
            filters: vec![Filter::TypeIs("event")],
            projection: vec![Projection::Field("_id")],
            order: Some(Order {
                field: "date",
                direction: Direction::Asc,
            }),
            slice: Slice::All,
        };
        assert_eq!(q.to_groq(), "*[_type == \"event\"]{_id}|order(date asc)");
    }

    #[test]
    fn list_queries_take_no_parameters() {
        // Only the detail query binds $slug.
        assert!(!events().to_groq().contains('$'));
        assert!(!articles().to_groq().contains('$'));
        assert!(article_by_slug().to_groq().contains("$slug"));
    }
}
