//! 教师与科目的多对多关联

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::profiles::requests::SetTeacherSubjectsRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

use super::{current_actor, error_response, forbidden_response};

pub struct TeacherSubjectService {
    storage: Option<Arc<dyn Storage>>,
}

fn teacher_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::NotFound,
        "Teacher not found",
    ))
}

impl TeacherSubjectService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list(&self, teacher_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        match storage.list_teacher_subjects(teacher_id).await {
            Ok(Some(subjects)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                subjects,
                "Teacher subjects retrieved successfully",
            ))),
            Ok(None) => Ok(teacher_not_found()),
            Err(e) => Ok(error_response(e, &[])),
        }
    }

    /// 整体替换，仅管理员与校长可用
    pub async fn replace(
        &self,
        teacher_id: i64,
        payload: SetTeacherSubjectsRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let actor = match current_actor(&storage, request).await {
            Ok(actor) => actor,
            Err(response) => return Ok(response),
        };
        if !actor.is_administrator() {
            return Ok(forbidden_response());
        }

        match storage
            .set_teacher_subjects(teacher_id, &payload.subject_ids)
            .await
        {
            Ok(Some(subjects)) => {
                tracing::info!(
                    "Teacher {} subjects replaced by user {}",
                    teacher_id,
                    actor.id()
                );
                Ok(HttpResponse::Ok().json(ApiResponse::success(
                    subjects,
                    "Teacher subjects updated successfully",
                )))
            }
            Ok(None) => Ok(teacher_not_found()),
            Err(e) => Ok(error_response(e, &[])),
        }
    }
}
