//! 테이블 정의
//!
//! 각 테이블의 키, 조회 컬럼, 논리 필드 → 물리 컬럼 매핑, 검색 필터를 정의합니다.

use crate::filter::FilterTable;

/// 테이블 정의
#[derive(Debug, Clone, Copy)]
pub struct TableDef {
    /// 테이블 이름
    pub name: &'static str,
    /// 단건 조회/수정/삭제 키 컬럼
    pub key: &'static str,
    /// 조회/RETURNING 컬럼 (비밀 컬럼 제외)
    pub columns: &'static [&'static str],
    /// 논리 필드 이름 → 물리 컬럼 이름
    pub column_map: &'static [(&'static str, &'static str)],
    /// 목록 조회 기본 정렬 컬럼
    pub order_by: &'static str,
}

impl TableDef {
    /// 논리 필드 이름의 물리 컬럼 이름
    pub fn column_for<'a>(&self, field: &'a str) -> &'a str {
        physical_name(field, self.column_map)
    }

    /// 물리 컬럼 이름의 논리 필드 이름 (응답 JSON 키)
    pub fn field_for<'a>(&self, column: &'a str) -> &'a str {
        self.column_map
            .iter()
            .find(|(_, physical)| *physical == column)
            .map(|(logical, _)| *logical)
            .unwrap_or(column)
    }
}

/// 논리 필드 이름 → 물리 컬럼 이름 (매핑이 없으면 필드 이름 그대로)
pub fn physical_name<'a>(field: &'a str, column_map: &[(&str, &'a str)]) -> &'a str {
    column_map
        .iter()
        .find(|(logical, _)| *logical == field)
        .map(|(_, physical)| *physical)
        .unwrap_or(field)
}

pub const COMPANIES: TableDef = TableDef {
    name: "companies",
    key: "handle",
    columns: &["handle", "name", "description", "num_employees", "logo_url"],
    column_map: &[("numEmployees", "num_employees"), ("logoUrl", "logo_url")],
    order_by: "name",
};

pub const JOBS: TableDef = TableDef {
    name: "jobs",
    key: "id",
    columns: &["id", "title", "salary", "equity", "company_handle"],
    column_map: &[("companyHandle", "company_handle")],
    order_by: "title",
};

pub const USERS: TableDef = TableDef {
    name: "users",
    key: "username",
    columns: &["username", "first_name", "last_name", "email", "is_admin"],
    column_map: &[
        ("firstName", "first_name"),
        ("lastName", "last_name"),
        ("isAdmin", "is_admin"),
    ],
    order_by: "username",
};

pub const APPLICATIONS: TableDef = TableDef {
    name: "applications",
    key: "username",
    columns: &["username", "job_id"],
    column_map: &[("jobId", "job_id")],
    order_by: "job_id",
};

/// 회사 검색 필터
///
/// - `name`: 대소문자 무시 부분 일치
/// - `minEmployees` / `maxEmployees`: 직원 수 범위
pub fn company_filters() -> FilterTable {
    FilterTable::new()
        .bound("name", r#"lower("name") LIKE lower('%' || $* || '%')"#)
        .bound("minEmployees", r#""num_employees" >= $*"#)
        .bound("maxEmployees", r#""num_employees" <= $*"#)
}

/// 채용 공고 검색 필터
///
/// - `title`: 대소문자 무시 부분 일치
/// - `minSalary`: 최소 연봉
/// - `hasEquity`: `true`이면 지분이 0보다 큰 공고만
pub fn job_filters() -> FilterTable {
    FilterTable::new()
        .bound("title", r#"lower("title") LIKE lower('%' || $* || '%')"#)
        .bound("minSalary", r#""salary" >= $*"#)
        .flag("hasEquity", r#""equity" > 0"#)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_column_mapping() {
        assert_eq!(COMPANIES.column_for("numEmployees"), "num_employees");
        assert_eq!(COMPANIES.column_for("name"), "name");
        assert_eq!(COMPANIES.field_for("logo_url"), "logoUrl");
        assert_eq!(USERS.field_for("is_admin"), "isAdmin");
        assert_eq!(JOBS.field_for("title"), "title");
    }

    #[test]
    fn test_partial_update_uses_table_mapping() {
        let data = json!({ "numEmployees": 5, "logoUrl": "http://c.img", "name": "C" });
        let set = crate::sql_for_partial_update(data.as_object().unwrap(), COMPANIES.column_map).unwrap();
        let expected = ["numEmployees", "logoUrl", "name"]
            .iter()
            .enumerate()
            .map(|(idx, field)| format!("\"{}\"=${}", COMPANIES.column_for(field), idx + 1))
            .collect::<Vec<_>>()
            .join(", ");
        assert_eq!(set.clause, expected);
        assert_eq!(physical_name("logoUrl", &[]), "logoUrl");
    }

    #[test]
    fn test_company_filters() {
        let query = json!({ "name": "net", "minEmployees": 2.0, "maxEmployees": 3.0 });
        let fragment = company_filters().build(query.as_object().unwrap()).unwrap();
        assert_eq!(
            fragment.clause,
            r#"lower("name") LIKE lower('%' || $1 || '%') AND "num_employees" >= $2 AND "num_employees" <= $3"#
        );
        assert_eq!(fragment.params, vec![json!("net"), json!(2.0), json!(3.0)]);
    }

    #[test]
    fn test_job_filters() {
        let query = json!({ "hasEquity": true, "minSalary": 150.0, "title": "j" });
        let fragment = job_filters().build(query.as_object().unwrap()).unwrap();
        assert_eq!(
            fragment.clause,
            r#""equity" > 0 AND "salary" >= $1 AND lower("title") LIKE lower('%' || $2 || '%')"#
        );
        assert_eq!(fragment.params, vec![json!(150.0), json!("j")]);
    }
}
