use std::collections::BTreeMap;

use common::{BASE_URL, User, client};
use pgrest::core::error::PgrestError;
use pgrest::prelude::*;

mod common;

fn url_of(build: impl FnOnce(&mut Table<User>) -> &mut Table<User>) -> String {
    let (client, _) = client();
    let mut table = client.table::<User>();
    build(&mut table);
    table.generate_url().unwrap()
}

#[test]
fn comparison_helpers() {
    let url = url_of(|t| t.eq("status", "ONLINE").gte("age", 18).lt("age", 65).neq("username", "kiwicopple"));
    assert_eq!(
        url,
        format!("{BASE_URL}/users?status=eq.ONLINE&age=gte.18&age=lt.65&username=neq.kiwicopple")
    );
}

#[test]
fn null_helpers() {
    let url = url_of(|t| t.is_null("catchphrase").not_null("status"));
    assert_eq!(url, format!("{BASE_URL}/users?catchphrase=is.null&status=not.is.null"));
}

#[test]
fn null_criterion_rewrites_through_filter() {
    let (client, _) = client();
    let mut table = client.table::<User>();
    table
        .filter("catchphrase", Operator::Equals, None::<String>)
        .unwrap()
        .filter("status", Operator::NotEqual, None::<String>)
        .unwrap();
    assert_eq!(
        table.generate_url().unwrap(),
        format!("{BASE_URL}/users?catchphrase=is.null&status=not.is.null")
    );
}

#[test]
fn null_with_other_operators_fails_before_any_request() {
    let (client, mock) = client();
    let mut table = client.table::<User>();
    for op in [Operator::GreaterThan, Operator::Like, Operator::In, Operator::Adjacent] {
        let err = table.filter("age", op, None::<i32>).unwrap_err();
        assert!(matches!(err, PgrestError::Usage(_)), "{op}: {err}");
    }
    assert!(table.state().filters.is_empty());
    assert!(mock.requests().is_empty());
}

#[test]
fn pattern_and_set_helpers() {
    let url = url_of(|t| t.like("username", "%dog%").ilike("catchphrase", "fat%").in_list("status", ["ONLINE", "OFFLINE"]));
    assert_eq!(
        url,
        format!(
            "{BASE_URL}/users?username=like.*dog*&catchphrase=ilike.fat*&status=in.(%22ONLINE%22,%22OFFLINE%22)"
        )
    );
}

#[test]
fn containment_and_ranges() {
    let (client, _) = client();
    let mut table = client.table::<User>();
    table
        .contains("tags", vec!["a", "b"])
        .unwrap()
        .overlaps("age_range", Interval::closed(1, 2))
        .unwrap()
        .filter("age_range", Operator::StrictlyLeft, Interval::closed(2, 3))
        .unwrap()
        .filter("age_range", Operator::NotLeftOf, 1i64..4)
        .unwrap();
    assert_eq!(
        table.generate_url().unwrap(),
        format!("{BASE_URL}/users?tags=cs.%7Ba,b%7D&age_range=ov.[1,2]&age_range=sl.[2,3]&age_range=nxl.[1,4)")
    );
}

#[test]
fn json_containment_with_map() {
    let mut map = BTreeMap::new();
    map.insert("bar", 100);
    let (client, _) = client();
    let mut table = client.table::<User>();
    table.contained_in("data", map).unwrap();
    assert_eq!(
        table.generate_url().unwrap(),
        format!("{BASE_URL}/users?data=cd.%7B%22bar%22:100%7D")
    );
}

#[test]
fn full_text_search() {
    let (client, _) = client();
    let mut table = client.table::<User>();
    table
        .text_search("catchphrase", Operator::FullTextSearch, FullTextSearch::new("cat", "english"))
        .unwrap();
    assert_eq!(
        table.generate_url().unwrap(),
        format!("{BASE_URL}/users?catchphrase=fts(english).cat")
    );

    let err = client
        .table::<User>()
        .text_search("catchphrase", Operator::Equals, FullTextSearch::new("cat", "english"))
        .unwrap_err();
    assert!(err.to_string().contains("expects a scalar"), "{err}");
}

#[test]
fn shape_mismatch_is_reported() {
    let (client, _) = client();
    let mut table = client.table::<User>();
    let err = table.filter("age_range", Operator::Adjacent, 3).unwrap_err();
    assert!(err.to_string().contains("interval"), "{err}");
    let err = table.filter("status", Operator::In, "ONLINE").unwrap_err();
    assert!(err.to_string().contains("a list or a map"), "{err}");
}

#[test]
fn logical_groups() {
    let url = url_of(|t| {
        t.and([Filter::gte("a", 0), Filter::lte("a", 100)])
            .or([Filter::eq("status", "ONLINE"), Filter::is_null("status")])
    });
    assert_eq!(
        url,
        format!("{BASE_URL}/users?and=(a.gte.0,a.lte.100)&or=(status.eq.ONLINE,status.is.null)")
    );
}

#[test]
fn group_values_with_reserved_characters_are_quoted() {
    let url = url_of(|t| t.or([Filter::eq("username", "Smith, John"), Filter::eq("age", 3)]));
    assert_eq!(
        url,
        format!("{BASE_URL}/users?or=(username.eq.%22Smith,%20John%22,age.eq.3)")
    );

    let url = url_of(|t| t.and([Filter::eq("status", "x,role.eq.admin")]));
    assert_eq!(url, format!("{BASE_URL}/users?and=(status.eq.%22x,role.eq.admin%22)"));
}

#[test]
fn negation() {
    let url = url_of(|t| t.not(Filter::eq("username", "supabot")));
    assert_eq!(url, format!("{BASE_URL}/users?username=not.eq.supabot"));

    let (client, _) = client();
    let mut table = client.table::<User>();
    table.not_where("status", Operator::In, vec!["OFFLINE", "AWAY"]).unwrap();
    assert_eq!(
        table.generate_url().unwrap(),
        format!("{BASE_URL}/users?status=not.in.(%22OFFLINE%22,%22AWAY%22)")
    );
}

#[test]
fn match_all_adds_one_equality_per_pair() {
    let (client, _) = client();
    let mut table = client.table::<User>();
    table
        .match_all([("username", "supabot"), ("status", "ONLINE")])
        .unwrap();
    assert_eq!(table.state().filters.len(), 2);
    assert_eq!(
        table.generate_url().unwrap(),
        format!("{BASE_URL}/users?username=eq.supabot&status=eq.ONLINE")
    );
}

#[test]
fn compiled_filters_parse_back() {
    let filters = [
        Filter::new("foo", Operator::Like, "%bar%").unwrap(),
        Filter::new("foo", Operator::In, vec!["bar", "buzz"]).unwrap(),
        Filter::new("foo", Operator::Contains, vec!["bar", "buzz"]).unwrap(),
        Filter::new("foo", Operator::StrictlyLeft, Interval::closed(2, 3)).unwrap(),
        Filter::new("foo", Operator::FullTextSearch, FullTextSearch::new("bar", "english")).unwrap(),
        Filter::not(Filter::eq("foo", "bar")),
        Filter::and([Filter::gte("a", 0), Filter::lte("a", 100)]),
        Filter::or([Filter::eq("username", "Smith, John"), Filter::eq("age", 3)]),
        Filter::new("tags", Operator::Contains, Vec::<String>::new()).unwrap(),
    ];
    for filter in filters {
        let (key, value) = filter.compile().unwrap();
        let parsed = Filter::parse(&key, &value).unwrap();
        assert_eq!(parsed, filter, "{key}={value}");
    }
}
