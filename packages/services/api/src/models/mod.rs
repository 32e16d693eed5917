//! 도메인 모델
//!
//! 각 모델은 `jobly_sql` 빌더로 SQL을 만들고 `db` 헬퍼로 실행합니다.

pub mod company;
pub mod job;
pub mod user;

use jobly_sql::{StatementBuilder, TableDef};
use serde_json::{Map, Value};

/// 입력 필드를 그대로 INSERT하는 문장과 파라미터
///
/// 필드 이름은 테이블의 물리 컬럼으로 바꾸고, 값은 필드 순서대로 바인딩합니다.
pub(crate) fn insert_statement(table: &TableDef, data: &Map<String, Value>) -> (String, Vec<Value>) {
    let columns: Vec<&str> = data.keys().map(|field| table.column_for(field)).collect();
    let sql = StatementBuilder::new(table).insert(&columns);
    (sql, data.values().cloned().collect())
}
