//! jobly-sql: 동적 SQL 조각 생성 라이브러리
//!
//! 요청 데이터(필드/필터 맵)를 위치 파라미터 기반 SQL 절과 파라미터 목록으로 변환합니다.
//! 값은 SQL 텍스트에 절대 인라인하지 않습니다. 실행은 호출자(API 서비스)의 몫입니다.
//!
//! # 모듈 구조
//!
//! - `fragment`: 절 텍스트 + 파라미터 묶음
//! - `update`: 부분 업데이트 SET 절 빌더
//! - `filter`: 검색 필터 WHERE 절 빌더
//! - `tables`: 테이블/컬럼 매핑/필터 정의
//! - `builder`: 테이블 단위 문장 빌더 (SeaQuery)

pub mod builder;
pub mod filter;
pub mod fragment;
pub mod tables;
pub mod update;

pub use builder::StatementBuilder;
pub use filter::{build_filter_clause, FilterTable, FilterTemplate, VALUE_MARKER};
pub use fragment::SqlFragment;
pub use tables::TableDef;
pub use update::sql_for_partial_update;
