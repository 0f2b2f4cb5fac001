//! # 검색 쿼리 조립기 (QueryAssembler)
//!
//! 검색 요청 하나를 저장소 전문검색 쿼리로 바꾸고,
//! 저장소가 돌려준 행들을 화면용 결과(`SearchResults`)로 바꿉니다.
//!
//! ## 처리 흐름
//! 1. `resolve_language()`: 언어 제한을 쓸지, 쓴다면 어떤 언어인지 결정
//! 2. `build_query()`: 선택 속성, 검색 범위(하위 노드), 필드별 전문검색 OR 조건,
//!    언어 조건, 페이지네이션을 쿼리 빌더에 채움
//! 3. 저장소가 쿼리를 실행 (조립기는 직접 I/O를 하지 않음)
//! 4. `map_results()`: 행 → contentId / url / title / summary
//!
//! 조립기는 요청 컨텍스트를 직접 읽지 않습니다. 컨트롤러가 페이지,
//! 검색어, 로케일을 꺼내서 평범한 값으로 넘겨줍니다.

use crate::{
    db::ContentStore,
    error::AppError,
    models::{
        FieldMap, ResultRow, SearchRequest, SearchResultItem, SearchResults,
        TranslationStrategy, CLASS_PROPERTY, DEFAULT_NODE_TYPE, IDENTIFIER_PROPERTY,
    },
    services::{
        markup,
        query::{Constraint, QueryBuilder},
        router::UrlGenerator,
    },
};

/// 번역 자식 노드 이름의 접두사 (`phpcr_locale:de`)
pub const LOCALE_NODE_PREFIX: &str = "phpcr_locale:";

/// 검색 범위와 필드 구성 (서버 설정에서 한 번 만들어 공유)
#[derive(Debug, Clone)]
pub struct QueryAssembler {
    /// 이 경로의 하위 노드만 검색합니다
    pub search_path: String,
    pub fields: FieldMap,
    pub translation_strategy: Option<TranslationStrategy>,
    pub restrict_by_language: bool,
}

impl QueryAssembler {
    /// 검색 결과를 제한할 언어를 결정합니다.
    ///
    /// - 언어 제한이 꺼져 있으면 무엇을 넘기든 `None`
    /// - 요청에 언어가 지정되었으면 그 값을 그대로 (검증은 `build_query`에서)
    /// - 아니면 요청의 기본 로케일
    pub fn resolve_language(
        &self,
        requested: Option<&str>,
        request_locale: &str,
    ) -> Option<String> {
        if !self.restrict_by_language {
            return None;
        }
        Some(requested.unwrap_or(request_locale).to_string())
    }

    /// 쿼리 빌더에 검색 조건을 채웁니다. 실행은 하지 않습니다.
    ///
    /// 페이지가 0이면 1로 취급해 오프셋이 음수가 되지 않게 합니다.
    pub fn build_query<B: QueryBuilder>(&self, qb: &mut B, request: &SearchRequest) {
        qb.select(IDENTIFIER_PROPERTY)
            .add_select(CLASS_PROPERTY)
            .from(DEFAULT_NODE_TYPE)
            .where_(Constraint::descendant_node(&self.search_path))
            .set_first_result(request.offset())
            .set_max_results(u64::from(request.per_page));

        // 필드 선언 순서대로 전문검색 조건을 OR로 이어 붙입니다
        let mut full_text: Option<Constraint> = None;
        for property in self.fields.properties() {
            qb.add_select(property);
            let matches = Constraint::full_text_search(property, &request.query);
            full_text = Some(match full_text {
                Some(existing) => existing.or(matches),
                None => matches,
            });
        }
        if let Some(constraint) = full_text {
            qb.and_where(constraint);
        }

        let language = request.language.as_deref().filter(|l| is_language_code(l));
        match (self.translation_strategy, language) {
            (Some(TranslationStrategy::Child), Some(lang)) => {
                qb.and_where(Constraint::node_name_equals(format!(
                    "{}{}",
                    LOCALE_NODE_PREFIX, lang
                )));
            }
            // TODO: decide whether the attribute strategy should filter on a locale property
            (Some(TranslationStrategy::Attribute), Some(_)) => {}
            _ => {}
        }

        tracing::debug!(
            query = %request.query,
            offset = request.offset(),
            limit = request.per_page,
            language = ?language,
            "built search query"
        );
    }

    /// 저장소 결과 행들을 contentId 기준의 결과 모음으로 바꿉니다.
    ///
    /// contentId 결정 규칙:
    /// - 클래스 구분 속성이 없는 행(번역 자식 노드 등): 부모 노드의 식별자
    /// - 그 외: 행의 식별자, 없으면 행의 경로
    ///
    /// 같은 contentId가 여러 번 나오면 나중 행이 이깁니다.
    pub async fn map_results<S, U>(
        &self,
        store: &S,
        rows: Vec<ResultRow>,
        urls: &U,
    ) -> Result<SearchResults, AppError>
    where
        S: ContentStore,
        U: UrlGenerator,
    {
        let mut results = SearchResults::new();

        for row in rows {
            let content_id = if row.has_class() {
                row.identifier()
                    .map(str::to_string)
                    .unwrap_or_else(|| row.path.clone())
            } else {
                store.parent_identifier(&row.path).await?
            };

            let url = urls.generate(None, &[("content_id", content_id.as_str())])?;
            let title = row.value(self.fields.title()).unwrap_or_default().to_string();
            let summary = markup::summarize(row.value(self.fields.summary()).unwrap_or_default());

            results.insert(SearchResultItem {
                content_id,
                url,
                title,
                summary,
            });
        }

        Ok(results)
    }

    /// 검색 전체 과정: 빈 검색어 확인 → 쿼리 조립 → 실행 → 결과 변환
    ///
    /// 검색어가 비어 있으면 저장소를 전혀 건드리지 않고 빈 결과를 돌려줍니다.
    pub async fn search<S, U>(
        &self,
        store: &S,
        urls: &U,
        request: &SearchRequest,
    ) -> Result<SearchResults, AppError>
    where
        S: ContentStore,
        U: UrlGenerator,
    {
        if request.query.is_empty() {
            tracing::debug!("empty search query, skipping repository");
            return Ok(SearchResults::new());
        }

        let mut qb = store.create_query_builder();
        self.build_query(&mut qb, request);
        let rows = store.execute(qb).await?;
        self.map_results(store, rows, urls).await
    }
}

/// 쿼리 리터럴에 넣어도 안전한 두 글자 언어 코드인지 확인합니다.
fn is_language_code(lang: &str) -> bool {
    lang.len() == 2 && lang.bytes().all(|b| b.is_ascii_alphabetic())
}
