//! # 쿼리 빌더 추상화
//!
//! 검색 로직(`QueryAssembler`)은 특정 저장소에 묶이지 않도록
//! 작은 능력(capability) 트레이트 `QueryBuilder`에만 의존합니다.
//!
//! - `Constraint`: 저장소 중립적인 조건 트리 (하위 노드, 전문검색, 이름 비교, AND/OR)
//! - `QueryBuilder`: select / from / where / 페이지네이션을 받는 트레이트
//! - `QueryDescriptor`: 호출 내용을 그대로 기록하는 기본 구현.
//!   SQLite 저장소는 이 기록을 SQL로 번역하고, 테스트는 모양을 검사합니다.

/// 저장소 중립적인 쿼리 조건
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// 노드가 `path`의 하위(자손) 노드여야 함
    DescendantNode { path: String },
    /// `property` 값에 `term`이 전문검색으로 매칭되어야 함
    FullTextSearch { property: String, term: String },
    /// 노드 이름이 `literal`과 같아야 함
    NodeNameEquals { literal: String },
    And(Box<Constraint>, Box<Constraint>),
    Or(Box<Constraint>, Box<Constraint>),
}

impl Constraint {
    pub fn descendant_node(path: impl Into<String>) -> Self {
        Self::DescendantNode { path: path.into() }
    }

    pub fn full_text_search(property: impl Into<String>, term: impl Into<String>) -> Self {
        Self::FullTextSearch {
            property: property.into(),
            term: term.into(),
        }
    }

    pub fn node_name_equals(literal: impl Into<String>) -> Self {
        Self::NodeNameEquals {
            literal: literal.into(),
        }
    }

    pub fn and(self, other: Constraint) -> Self {
        Self::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Constraint) -> Self {
        Self::Or(Box::new(self), Box::new(other))
    }

    /// OR 트리를 평탄화해 조건들을 순서대로 돌려줍니다.
    #[cfg(test)]
    pub fn disjuncts(&self) -> Vec<&Constraint> {
        match self {
            Self::Or(left, right) => {
                let mut out = left.disjuncts();
                out.extend(right.disjuncts());
                out
            }
            other => vec![other],
        }
    }

    /// AND 트리를 평탄화해 조건들을 순서대로 돌려줍니다.
    #[cfg(test)]
    pub fn conjuncts(&self) -> Vec<&Constraint> {
        match self {
            Self::And(left, right) => {
                let mut out = left.conjuncts();
                out.extend(right.conjuncts());
                out
            }
            other => vec![other],
        }
    }
}

/// 저장소별로 구현하는 쿼리 구성 능력
///
/// 메서드는 `&mut Self`를 돌려주므로 체이닝할 수 있습니다.
pub trait QueryBuilder {
    /// 선택 속성 목록을 `property` 하나로 초기화합니다.
    fn select(&mut self, property: &str) -> &mut Self;
    fn add_select(&mut self, property: &str) -> &mut Self;
    /// 검색할 노드 타입
    fn from(&mut self, node_type: &str) -> &mut Self;
    /// 기존 조건을 `constraint`로 교체합니다.
    fn where_(&mut self, constraint: Constraint) -> &mut Self;
    /// 기존 조건과 AND로 묶습니다. 기존 조건이 없으면 `where_`와 같습니다.
    fn and_where(&mut self, constraint: Constraint) -> &mut Self;
    fn set_first_result(&mut self, offset: u64) -> &mut Self;
    fn set_max_results(&mut self, limit: u64) -> &mut Self;
}

/// `QueryBuilder` 호출을 그대로 기록한 실행 가능한 쿼리 기술자
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryDescriptor {
    pub node_type: Option<String>,
    pub selects: Vec<String>,
    pub constraint: Option<Constraint>,
    pub first_result: u64,
    pub max_results: Option<u64>,
}

impl QueryDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// 최상위 AND 조건들
    #[cfg(test)]
    pub fn conjuncts(&self) -> Vec<&Constraint> {
        self.constraint
            .as_ref()
            .map(Constraint::conjuncts)
            .unwrap_or_default()
    }
}

impl QueryBuilder for QueryDescriptor {
    fn select(&mut self, property: &str) -> &mut Self {
        self.selects.clear();
        self.selects.push(property.to_string());
        self
    }

    fn add_select(&mut self, property: &str) -> &mut Self {
        if !self.selects.iter().any(|s| s == property) {
            self.selects.push(property.to_string());
        }
        self
    }

    fn from(&mut self, node_type: &str) -> &mut Self {
        self.node_type = Some(node_type.to_string());
        self
    }

    fn where_(&mut self, constraint: Constraint) -> &mut Self {
        self.constraint = Some(constraint);
        self
    }

    fn and_where(&mut self, constraint: Constraint) -> &mut Self {
        self.constraint = Some(match self.constraint.take() {
            Some(existing) => existing.and(constraint),
            None => constraint,
        });
        self
    }

    fn set_first_result(&mut self, offset: u64) -> &mut Self {
        self.first_result = offset;
        self
    }

    fn set_max_results(&mut self, limit: u64) -> &mut Self {
        self.max_results = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn and_where_chains_onto_existing_constraint() {
        let mut qb = QueryDescriptor::new();
        qb.and_where(Constraint::descendant_node("/cms"))
            .and_where(Constraint::node_name_equals("x"));

        assert_eq!(
            qb.conjuncts(),
            vec![
                &Constraint::descendant_node("/cms"),
                &Constraint::node_name_equals("x")
            ]
        );
    }

    #[test]
    fn select_resets_and_add_select_dedupes() {
        let mut qb = QueryDescriptor::new();
        qb.add_select("a").select("jcr:uuid").add_select("title").add_select("title");
        assert_eq!(qb.selects, vec!["jcr:uuid", "title"]);
    }

    #[test]
    fn disjuncts_flatten_left_nested_or() {
        let c = Constraint::full_text_search("a", "t")
            .or(Constraint::full_text_search("b", "t"))
            .or(Constraint::full_text_search("c", "t"));
        let props: Vec<_> = c
            .disjuncts()
            .into_iter()
            .map(|d| match d {
                Constraint::FullTextSearch { property, .. } => property.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(props, vec!["a", "b", "c"]);
    }
}
