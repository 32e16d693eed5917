//! 검색 필터 WHERE 절 빌더
//!
//! 필터 이름 → SQL 조건 템플릿 테이블을 기준으로 `WHERE` 절 조각을 생성합니다.
//!
//! # 템플릿 종류
//!
//! - `Bound`: 값을 바인딩하는 조건. 템플릿에 [`VALUE_MARKER`]가 정확히 한 번 들어가며
//!   `$<n>`으로 치환됩니다. 위치 `n`은 바인딩 필터끼리만 셉니다.
//! - `Flag`: 값을 바인딩하지 않는 고정 조건. 필터 값이 `true`일 때만 조건이 추가되고
//!   파라미터 자리를 차지하지 않습니다.

use serde_json::{Map, Value};

use jobly_core::{Error, Result};

use crate::fragment::{placeholder, SqlFragment};

/// 바인딩 템플릿의 값 위치 표시
pub const VALUE_MARKER: &str = "$*";

/// 필터 조건 템플릿
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterTemplate {
    /// 값을 바인딩하는 조건 (예: `"salary" >= $*`)
    Bound(&'static str),
    /// 값 없이 켜고 끄는 조건 (예: `"equity" > 0`)
    Flag(&'static str),
}

/// 필터 이름 → 템플릿 테이블
#[derive(Debug, Clone, Default)]
pub struct FilterTable {
    entries: Vec<(&'static str, FilterTemplate)>,
}

impl FilterTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 바인딩 필터 추가
    pub fn bound(mut self, name: &'static str, template: &'static str) -> Self {
        self.entries.push((name, FilterTemplate::Bound(template)));
        self
    }

    /// 플래그 필터 추가
    pub fn flag(mut self, name: &'static str, template: &'static str) -> Self {
        self.entries.push((name, FilterTemplate::Flag(template)));
        self
    }

    pub fn get(&self, name: &str) -> Option<FilterTemplate> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == name)
            .map(|(_, template)| *template)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    /// 이 테이블로 필터 절 생성 ([`build_filter_clause`] 참고)
    pub fn build(&self, filters: &Map<String, Value>) -> Result<SqlFragment> {
        build_filter_clause(filters, self)
    }
}

/// 필터 WHERE 절 생성
///
/// 필터를 삽입 순서대로 템플릿에 대입하고 ` AND `로 연결합니다.
/// `params`에는 바인딩 필터의 값만 순서대로 들어갑니다.
/// 필터가 비어 있으면 빈 조각을 반환하므로, 호출자는 `WHERE` 키워드를 생략해야 합니다.
///
/// # Errors
///
/// - 테이블에 없는 필터 이름: `Error::UnknownFilter`
/// - 값 표시가 없는 바인딩 템플릿: `Error::InvalidFilterTemplate`
pub fn build_filter_clause(
    filters: &Map<String, Value>,
    templates: &FilterTable,
) -> Result<SqlFragment> {
    let mut predicates = Vec::with_capacity(filters.len());
    let mut params = Vec::new();

    for (name, value) in filters {
        let template = templates.get(name).ok_or_else(|| Error::UnknownFilter {
            name: name.clone(),
        })?;

        match template {
            FilterTemplate::Bound(text) => {
                if !text.contains(VALUE_MARKER) {
                    return Err(Error::InvalidFilterTemplate { name: name.clone() });
                }
                params.push(value.clone());
                predicates.push(text.replacen(VALUE_MARKER, &placeholder(params.len()), 1));
            }
            FilterTemplate::Flag(text) => {
                if value.as_bool() == Some(true) {
                    predicates.push(text.to_string());
                }
            }
        }
    }

    Ok(SqlFragment {
        clause: predicates.join(" AND "),
        params,
    })
}
