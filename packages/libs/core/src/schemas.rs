//! 요청 스키마
//!
//! `schemas/*.json` 파일을 바이너리에 포함하고, 시작 시 한 번 로드합니다.

use crate::error::Result;
use crate::validation::ObjectSchema;

/// 라우트별 요청 스키마 모음
#[derive(Debug, Clone)]
pub struct RequestSchemas {
    pub company_new: ObjectSchema,
    pub company_update: ObjectSchema,
    pub company_search: ObjectSchema,
    pub job_new: ObjectSchema,
    pub job_update: ObjectSchema,
    pub job_search: ObjectSchema,
    pub user_new: ObjectSchema,
    pub user_update: ObjectSchema,
    pub user_auth: ObjectSchema,
    pub user_register: ObjectSchema,
}

impl RequestSchemas {
    /// 포함된 JSON 스키마를 모두 파싱
    pub fn load() -> Result<Self> {
        Ok(Self {
            company_new: ObjectSchema::from_json(include_str!("../schemas/companyNew.json"))?,
            company_update: ObjectSchema::from_json(include_str!("../schemas/companyUpdate.json"))?,
            company_search: ObjectSchema::from_json(include_str!("../schemas/companySearch.json"))?,
            job_new: ObjectSchema::from_json(include_str!("../schemas/jobNew.json"))?,
            job_update: ObjectSchema::from_json(include_str!("../schemas/jobUpdate.json"))?,
            job_search: ObjectSchema::from_json(include_str!("../schemas/jobSearch.json"))?,
            user_new: ObjectSchema::from_json(include_str!("../schemas/userNew.json"))?,
            user_update: ObjectSchema::from_json(include_str!("../schemas/userUpdate.json"))?,
            user_auth: ObjectSchema::from_json(include_str!("../schemas/userAuth.json"))?,
            user_register: ObjectSchema::from_json(include_str!("../schemas/userRegister.json"))?,
        })
    }
}
