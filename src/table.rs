//! Fluent per-table query builder.
//!
//! Accumulator methods return `&mut Self` (or `Result<&mut Self>` when the
//! criterion shape is only known at runtime) so calls chain. Terminal methods
//! (`get`, `single`, `insert`, `upsert`, `update`, `delete`, `delete_record`,
//! `count`) take the accumulated [`QueryState`] out before anything can fail,
//! so the builder is always back to a fresh state afterwards.
//!
//! A builder is not meant for concurrent terminal calls. Prefer one builder
//! per query; reuse after a terminal call starts from an empty state.

use std::marker::PhantomData;

use crate::client::Client;
use crate::core::criterion::{Criterion, FullTextSearch, Scalar};
use crate::core::error::{PgrestError, Result};
use crate::core::filter::Filter;
use crate::core::headers::{self, Headers};
use crate::core::operator::{NullPosition, Operator, Ordering};
use crate::core::options::{CountType, QueryOptions};
use crate::core::order::Orderer;
use crate::core::record::Record;
use crate::core::response::{ModeledResponse, parse_models};
use crate::request;
use crate::state::{QueryState, RowRange, Scoped};
use crate::transport::{HttpRequest, Method, dispatch};

/// One record or a slice of records. Serialized as a JSON object or array.
#[derive(Debug)]
pub enum Payload<'a, T> {
    One(&'a T),
    Many(&'a [T]),
}

impl<'a, T> From<&'a T> for Payload<'a, T> {
    fn from(record: &'a T) -> Self {
        Self::One(record)
    }
}

impl<'a, T> From<&'a [T]> for Payload<'a, T> {
    fn from(records: &'a [T]) -> Self {
        Self::Many(records)
    }
}

impl<'a, T> From<&'a Vec<T>> for Payload<'a, T> {
    fn from(records: &'a Vec<T>) -> Self {
        Self::Many(records.as_slice())
    }
}

impl<T: Record> Payload<'_, T> {
    fn to_json(&self) -> Result<String> {
        let json = match self {
            Self::One(record) => serde_json::to_string(record)?,
            Self::Many(records) => serde_json::to_string(records)?,
        };
        Ok(json)
    }
}

/// Query builder bound to the table of `T`.
pub struct Table<T: Record> {
    client: Client,
    state: QueryState,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> std::fmt::Debug for Table<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("table", &T::DESCRIPTOR.table_name)
            .field("state", &self.state)
            .finish()
    }
}

impl<T: Record> Table<T> {
    pub(crate) fn new(client: Client) -> Self {
        Self {
            client,
            state: QueryState::default(),
            _record: PhantomData,
        }
    }

    pub fn table_name(&self) -> &'static str {
        T::DESCRIPTOR.table_name
    }

    /// What has been accumulated since the last terminal call.
    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// Drops all accumulated filters, orderers, projection and pagination.
    pub fn clear(&mut self) -> &mut Self {
        self.state.clear();
        pgrest_core::pgrest_trace_state!("clear", T::DESCRIPTOR.table_name);
        self
    }

    // ---------------------------------------------------------------------
    // Filters
    // ---------------------------------------------------------------------

    /// Adds `column <operator> criterion`, failing if the criterion shape does not fit.
    pub fn filter(
        &mut self,
        column: impl Into<String>,
        operator: Operator,
        criterion: impl Into<Criterion>,
    ) -> Result<&mut Self> {
        let filter = Filter::new(column, operator, criterion)?;
        Ok(self.r#where(filter))
    }

    /// Adds a prebuilt filter.
    pub fn r#where(&mut self, filter: Filter) -> &mut Self {
        self.state.filters.push(filter);
        self
    }

    pub fn not(&mut self, filter: Filter) -> &mut Self {
        self.r#where(Filter::not(filter))
    }

    /// `column=not.<operator>.<criterion>`
    pub fn not_where(
        &mut self,
        column: impl Into<String>,
        operator: Operator,
        criterion: impl Into<Criterion>,
    ) -> Result<&mut Self> {
        let filter = Filter::new(column, operator, criterion)?;
        Ok(self.not(filter))
    }

    pub fn and(&mut self, filters: impl IntoIterator<Item = Filter>) -> &mut Self {
        self.r#where(Filter::and(filters))
    }

    pub fn or(&mut self, filters: impl IntoIterator<Item = Filter>) -> &mut Self {
        self.r#where(Filter::or(filters))
    }

    /// One equality filter per `(column, value)` pair, in iteration order.
    pub fn match_all<K, V>(&mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Result<&mut Self>
    where
        K: Into<String>,
        V: Into<Criterion>,
    {
        for (column, value) in pairs {
            self.filter(column, Operator::Equals, value)?;
        }
        Ok(self)
    }

    pub fn eq(&mut self, column: impl Into<String>, value: impl Into<Scalar>) -> &mut Self {
        self.r#where(Filter::eq(column, value))
    }

    pub fn neq(&mut self, column: impl Into<String>, value: impl Into<Scalar>) -> &mut Self {
        self.r#where(Filter::neq(column, value))
    }

    pub fn gt(&mut self, column: impl Into<String>, value: impl Into<Scalar>) -> &mut Self {
        self.r#where(Filter::gt(column, value))
    }

    pub fn gte(&mut self, column: impl Into<String>, value: impl Into<Scalar>) -> &mut Self {
        self.r#where(Filter::gte(column, value))
    }

    pub fn lt(&mut self, column: impl Into<String>, value: impl Into<Scalar>) -> &mut Self {
        self.r#where(Filter::lt(column, value))
    }

    pub fn lte(&mut self, column: impl Into<String>, value: impl Into<Scalar>) -> &mut Self {
        self.r#where(Filter::lte(column, value))
    }

    /// SQL `LIKE` with `%` wildcards.
    pub fn like(&mut self, column: impl Into<String>, pattern: impl Into<String>) -> &mut Self {
        self.pattern(column, Operator::Like, pattern.into())
    }

    pub fn ilike(&mut self, column: impl Into<String>, pattern: impl Into<String>) -> &mut Self {
        self.pattern(column, Operator::ILike, pattern.into())
    }

    fn pattern(&mut self, column: impl Into<String>, operator: Operator, pattern: String) -> &mut Self {
        self.r#where(Filter::Leaf {
            column: column.into(),
            operator,
            criterion: Criterion::Scalar(Scalar::Text(pattern)),
        })
    }

    pub fn is_null(&mut self, column: impl Into<String>) -> &mut Self {
        self.r#where(Filter::is_null(column))
    }

    pub fn not_null(&mut self, column: impl Into<String>) -> &mut Self {
        self.not(Filter::is_null(column))
    }

    /// `column=in.("a","b")`
    pub fn in_list<V: Into<Scalar>>(
        &mut self,
        column: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> &mut Self {
        self.r#where(Filter::Leaf {
            column: column.into(),
            operator: Operator::In,
            criterion: Criterion::list(values),
        })
    }

    pub fn contains(&mut self, column: impl Into<String>, criterion: impl Into<Criterion>) -> Result<&mut Self> {
        self.filter(column, Operator::Contains, criterion)
    }

    pub fn contained_in(
        &mut self,
        column: impl Into<String>,
        criterion: impl Into<Criterion>,
    ) -> Result<&mut Self> {
        self.filter(column, Operator::ContainedIn, criterion)
    }

    pub fn overlaps(&mut self, column: impl Into<String>, criterion: impl Into<Criterion>) -> Result<&mut Self> {
        self.filter(column, Operator::Overlap, criterion)
    }

    /// Full-text search; `operator` picks the fts/plfts/phfts/wfts variant.
    pub fn text_search(
        &mut self,
        column: impl Into<String>,
        operator: Operator,
        search: FullTextSearch,
    ) -> Result<&mut Self> {
        self.filter(column, operator, search)
    }

    // ---------------------------------------------------------------------
    // Ordering, projection, pagination
    // ---------------------------------------------------------------------

    pub fn order(&mut self, column: impl Into<String>, ordering: Ordering, nulls: NullPosition) -> &mut Self {
        self.state.orderers.push(Orderer::new(column, ordering, nulls));
        self
    }

    /// Orders rows of an embedded table (`<foreign_table>.order=`).
    pub fn order_foreign(
        &mut self,
        foreign_table: impl Into<String>,
        column: impl Into<String>,
        ordering: Ordering,
        nulls: NullPosition,
    ) -> &mut Self {
        self.state
            .orderers
            .push(Orderer::foreign(foreign_table, column, ordering, nulls));
        self
    }

    /// Column projection, e.g. `"username, messages(id)"`. Whitespace is stripped.
    pub fn select(&mut self, columns: impl Into<String>) -> &mut Self {
        self.state.select = Some(columns.into());
        self
    }

    pub fn limit(&mut self, limit: u64) -> &mut Self {
        self.state.limit = Some(Scoped::new(limit, None));
        self
    }

    pub fn limit_foreign(&mut self, foreign_table: impl Into<String>, limit: u64) -> &mut Self {
        self.state.limit = Some(Scoped::new(limit, Some(foreign_table.into())));
        self
    }

    pub fn offset(&mut self, offset: u64) -> &mut Self {
        self.state.offset = Some(Scoped::new(offset, None));
        self
    }

    pub fn offset_foreign(&mut self, foreign_table: impl Into<String>, offset: u64) -> &mut Self {
        self.state.offset = Some(Scoped::new(offset, Some(foreign_table.into())));
        self
    }

    /// Rows `from..=to` through the `Range` header.
    pub fn range(&mut self, from: u64, to: u64) -> &mut Self {
        self.state.range = Some(RowRange { from, to: Some(to) });
        self
    }

    /// Rows from `from` onwards (`Range: <from>-`).
    pub fn range_from(&mut self, from: u64) -> &mut Self {
        self.state.range = Some(RowRange { from, to: None });
        self
    }

    /// Unique column an upsert resolves conflicts on.
    pub fn on_conflict(&mut self, column: impl Into<String>) -> &mut Self {
        self.state.on_conflict = Some(column.into());
        self
    }

    /// URL a `get()` would request right now, without clearing anything.
    pub fn generate_url(&self) -> Result<String> {
        request::build_url(
            self.client.url(),
            T::DESCRIPTOR.table_name,
            self.client.options(),
            &self.state,
        )
    }

    // ---------------------------------------------------------------------
    // Terminal operations
    // ---------------------------------------------------------------------

    /// Moves the accumulated state out so the builder is fresh whatever happens next.
    fn take_state(&mut self, method: Method) -> QueryState {
        let mut state = self.state.take();
        state.method = Some(method);
        pgrest_core::pgrest_trace_state!("clear", T::DESCRIPTOR.table_name);
        state
    }

    fn prepare(
        &self,
        state: &QueryState,
        body: Option<String>,
        overrides: Headers,
    ) -> Result<HttpRequest> {
        let method = state.method.unwrap_or(Method::Get);
        request::assemble(
            self.client.url(),
            T::DESCRIPTOR.table_name,
            self.client.options(),
            method,
            state,
            body,
            overrides,
        )
    }

    async fn send(&self, request: HttpRequest) -> Result<ModeledResponse<T>> {
        let base = dispatch(self.client.transport(), request).await?;
        ModeledResponse::from_base(base)
    }

    /// GET every row matching the accumulated query.
    pub async fn get(&mut self) -> Result<ModeledResponse<T>> {
        let state = self.take_state(Method::Get);
        let request = self.prepare(&state, None, Headers::new())?;
        self.send(request).await
    }

    /// GET exactly one row. Zero or several matches resolve to `None`.
    pub async fn single(&mut self) -> Result<Option<T>> {
        let state = self.take_state(Method::Get);
        let mut overrides = Headers::new();
        overrides.insert(headers::ACCEPT.to_string(), headers::OBJECT_JSON.to_string());
        overrides.insert(headers::PREFER.to_string(), "return=representation".to_string());
        let request = self.prepare(&state, None, overrides)?;

        match dispatch(self.client.transport(), request).await {
            Ok(base) => Ok(parse_models::<T>(&base.content)?.into_iter().next()),
            Err(err) if err.is_not_acceptable() => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub async fn insert<'a>(&mut self, payload: impl Into<Payload<'a, T>>) -> Result<ModeledResponse<T>> {
        self.insert_with(payload, QueryOptions::default()).await
    }

    /// POST one record (JSON object) or many (JSON array).
    pub async fn insert_with<'a>(
        &mut self,
        payload: impl Into<Payload<'a, T>>,
        options: QueryOptions,
    ) -> Result<ModeledResponse<T>> {
        let mut state = self.take_state(Method::Post);
        if let Some(column) = &options.on_conflict {
            state.on_conflict = Some(column.clone());
        }
        let body = payload.into().to_json()?;
        let request = self.prepare(&state, Some(body), options.to_headers())?;
        self.send(request).await
    }

    pub async fn upsert<'a>(&mut self, payload: impl Into<Payload<'a, T>>) -> Result<ModeledResponse<T>> {
        self.upsert_with(payload, QueryOptions::default()).await
    }

    /// Insert with `upsert` forced on.
    pub async fn upsert_with<'a>(
        &mut self,
        payload: impl Into<Payload<'a, T>>,
        options: QueryOptions,
    ) -> Result<ModeledResponse<T>> {
        self.insert_with(payload, options.upsert(true)).await
    }

    pub async fn update(&mut self, record: &T) -> Result<ModeledResponse<T>> {
        self.update_with(record, QueryOptions::default()).await
    }

    /// PATCH `record`, filtered by an added equality on its primary key.
    pub async fn update_with(&mut self, record: &T, options: QueryOptions) -> Result<ModeledResponse<T>> {
        let mut state = self.take_state(Method::Patch);
        state.filters.push(record.primary_key_filter()?);
        let body = serde_json::to_string(record)?;
        let request = self.prepare(&state, Some(body), options.to_headers())?;
        self.send(request).await
    }

    pub async fn delete(&mut self) -> Result<ModeledResponse<T>> {
        self.delete_with(QueryOptions::default()).await
    }

    /// DELETE every row matching the accumulated filters.
    pub async fn delete_with(&mut self, options: QueryOptions) -> Result<ModeledResponse<T>> {
        let state = self.take_state(Method::Delete);
        let request = self.prepare(&state, None, options.to_headers())?;
        self.send(request).await
    }

    pub async fn delete_record(&mut self, record: &T) -> Result<ModeledResponse<T>> {
        self.delete_record_with(record, QueryOptions::default()).await
    }

    /// DELETE by primary key only; other accumulated filters are discarded.
    pub async fn delete_record_with(&mut self, record: &T, options: QueryOptions) -> Result<ModeledResponse<T>> {
        let mut state = self.take_state(Method::Delete);
        state.filters = vec![record.primary_key_filter()?];
        let request = self.prepare(&state, None, options.to_headers())?;
        self.send(request).await
    }

    /// HEAD with `Prefer: count=<strategy>`, reading the total from `Content-Range`.
    pub async fn count(&mut self, strategy: CountType) -> Result<u64> {
        let state = self.take_state(Method::Head);
        if strategy == CountType::None {
            return Err(PgrestError::Usage(
                "count() needs the Exact, Planned or Estimated strategy".to_string(),
            ));
        }
        let mut overrides = Headers::new();
        overrides.insert(headers::PREFER.to_string(), format!("count={strategy}"));
        let request = self.prepare(&state, None, overrides)?;
        let base = dispatch(self.client.transport(), request).await?;
        base.content_range_total()
    }
}
