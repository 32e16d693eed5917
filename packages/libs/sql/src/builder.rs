//! 문장 빌더
//!
//! `TableDef`와 SQL 조각을 받아 Postgres 문장을 생성합니다.
//! SELECT / INSERT / DELETE는 SeaQuery로 조립하고, 필터·SET 조각은 그대로 끼워 넣습니다.
//! 값은 문장에 인라인하지 않고 `$n` 위치 파라미터로만 참조합니다.

use sea_query::{Expr, Iden, Order, PostgresQueryBuilder, Query, QueryStatementWriter};

use crate::fragment::{placeholder, SqlFragment};
use crate::tables::TableDef;

/// 동적 테이블/컬럼 식별자
#[derive(Debug, Clone)]
struct DynIden(String);

impl Iden for DynIden {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        let _ = write!(s, "{}", self.0);
    }
}

fn iden(name: &str) -> DynIden {
    DynIden(name.to_string())
}

/// 테이블 단위 문장 빌더
pub struct StatementBuilder<'a> {
    table: &'a TableDef,
}

impl<'a> StatementBuilder<'a> {
    /// 새 빌더 생성
    pub fn new(table: &'a TableDef) -> Self {
        Self { table }
    }

    /// 목록 조회
    ///
    /// 필터 조각이 비어 있으면 WHERE 절을 생략합니다.
    /// 필터 파라미터는 `$1`부터 바인딩합니다.
    pub fn select(&self, filter: &SqlFragment) -> String {
        let mut query = Query::select();
        query.from(iden(self.table.name));

        for column in self.table.columns {
            query.column(iden(column));
        }

        if !filter.is_empty() {
            query.and_where(Expr::cust(filter.clause.clone()));
        }

        query.order_by(iden(self.table.order_by), Order::Asc);
        finish(&query)
    }

    /// 키로 단건 조회 (`$1` = 키)
    pub fn select_by_key(&self) -> String {
        self.select_where(self.table.columns, &[self.table.key], None)
    }

    /// 지정 컬럼 조회
    ///
    /// `where_columns`는 순서대로 `$1`, `$2`, …와 등호로 비교합니다.
    pub fn select_where(
        &self,
        columns: &[&str],
        where_columns: &[&str],
        order_by: Option<&str>,
    ) -> String {
        let mut query = Query::select();
        query.from(iden(self.table.name));

        for column in columns {
            query.column(iden(column));
        }

        if !where_columns.is_empty() {
            query.and_where(Expr::cust(equality_clause(where_columns)));
        }

        if let Some(order) = order_by {
            query.order_by(iden(order), Order::Asc);
        }

        finish(&query)
    }

    /// INSERT (`$1..$n` = `columns` 순서의 값), 조회 컬럼을 RETURNING
    pub fn insert(&self, columns: &[&str]) -> String {
        let mut query = Query::insert();
        query.into_table(iden(self.table.name));
        query.columns(columns.iter().map(|column| iden(column)));
        query.values_panic((1..=columns.len()).map(|idx| Expr::cust(placeholder(idx))));
        query.returning(Query::returning().columns(self.table.columns.iter().map(|c| iden(c))));

        finish(&query)
    }

    /// 부분 업데이트
    ///
    /// SET 조각의 파라미터 뒤, `set.next_placeholder()` 위치에 키를 바인딩합니다.
    pub fn update(&self, set: &SqlFragment) -> String {
        format!(
            "UPDATE \"{}\" SET {} WHERE \"{}\" = {} RETURNING {}",
            self.table.name,
            set.clause,
            self.table.key,
            placeholder(set.next_placeholder()),
            quoted_list(self.table.columns),
        )
    }

    /// 키로 삭제 (`$1` = 키), 키를 RETURNING
    pub fn delete(&self) -> String {
        let mut query = Query::delete();
        query.from_table(iden(self.table.name));
        query.and_where(Expr::cust(equality_clause(&[self.table.key])));
        query.returning(Query::returning().column(iden(self.table.key)));

        finish(&query)
    }
}

/// `"a" = $1 AND "b" = $2 ...` (하나의 custom 식으로 WHERE에 넣음)
fn equality_clause(columns: &[&str]) -> String {
    columns
        .iter()
        .enumerate()
        .map(|(idx, column)| format!("\"{}\" = {}", column, placeholder(idx + 1)))
        .collect::<Vec<_>>()
        .join(" AND ")
}

/// 위치 파라미터를 그대로 둔 채 SQL 텍스트만 생성
///
/// `to_string`은 `$n`을 값으로 치환하려 하므로 `build`를 씁니다.
fn finish<S: QueryStatementWriter>(query: &S) -> String {
    let (sql, _values) = query.build(PostgresQueryBuilder);
    sql
}

fn quoted_list(columns: &[&str]) -> String {
    columns
        .iter()
        .map(|column| format!("\"{}\"", column))
        .collect::<Vec<_>>()
        .join(", ")
}
