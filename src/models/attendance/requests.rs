use chrono::NaiveDate;
use serde::Deserialize;

use super::entities::AttendanceStatus;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAttendanceRequest {
    pub student_id: i64,
    pub date: NaiveDate,
    pub status: Option<AttendanceStatus>,
    // 教师创建时由服务端填写
    pub marked_by: Option<i64>,
    pub class_id: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAttendanceRequest {
    pub date: Option<NaiveDate>,
    pub status: Option<AttendanceStatus>,
    pub class_id: Option<i64>,
}
