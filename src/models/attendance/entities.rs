use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::common::enums::string_enum;

string_enum! {
    AttendanceStatus {
        Present => "present",
        Absent => "absent",
        Late => "late",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attendance {
    pub id: i64,
    pub student_id: i64,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub marked_by: i64,
    pub class_id: i64,
}

/// 出勤率（百分比，保留两位小数），无记录时为 0
pub fn attendance_percentage(present_days: u64, total_days: u64) -> f64 {
    if total_days == 0 {
        return 0.0;
    }
    let ratio = present_days as f64 / total_days as f64 * 100.0;
    (ratio * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attendance_percentage() {
        assert_eq!(attendance_percentage(8, 10), 80.0);
        assert_eq!(attendance_percentage(10, 10), 100.0);
        assert_eq!(attendance_percentage(1, 3), 33.33);
        assert_eq!(attendance_percentage(2, 3), 66.67);
    }

    #[test]
    fn test_attendance_percentage_without_records() {
        assert_eq!(attendance_percentage(0, 0), 0.0);
    }
}
