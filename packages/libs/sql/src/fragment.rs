//! SQL 조각 (절 텍스트 + 위치 파라미터)

use serde_json::Value;

/// SQL 절 조각
///
/// `clause`는 파라미터를 `$1`, `$2`, … 위치로만 참조하며,
/// N번째 placeholder는 `params`의 N번째 값에 대응합니다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlFragment {
    pub clause: String,
    pub params: Vec<Value>,
}

impl SqlFragment {
    /// 빈 조각 (WHERE 절을 생략해야 함)
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.clause.is_empty()
    }

    /// 이 조각 뒤에 이어 붙일 다음 placeholder 위치 (1부터 시작)
    pub fn next_placeholder(&self) -> usize {
        self.params.len() + 1
    }
}

/// `$n` placeholder 텍스트
pub fn placeholder(position: usize) -> String {
    format!("${}", position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_next_placeholder() {
        let fragment = SqlFragment {
            clause: "\"name\"=$1, \"age\"=$2".to_string(),
            params: vec![json!("a"), json!(3)],
        };
        assert_eq!(fragment.next_placeholder(), 3);
        assert_eq!(placeholder(fragment.next_placeholder()), "$3");
        assert!(SqlFragment::empty().is_empty());
        assert_eq!(SqlFragment::empty().next_placeholder(), 1);
    }
}
