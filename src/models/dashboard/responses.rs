use serde::Serialize;

use crate::models::academics::entities::{AcademicYear, Content, Subject, Timetable};
use crate::models::assessments::entities::Assessment;
use crate::models::communications::entities::Announcement;
use crate::models::fees::entities::FeePayment;
use crate::models::profiles::entities::{Parent, ProfileInfo, Student, Teacher};

#[derive(Debug, Serialize)]
pub struct AdminDashboard {
    pub total_students: u64,
    pub total_teachers: u64,
    pub total_parents: u64,
    pub total_classes: u64,
    pub total_subjects: u64,
    pub active_academic_year: Option<AcademicYear>,
    pub recent_announcements: Vec<Announcement>,
}

#[derive(Debug, Serialize)]
pub struct TeacherDashboard {
    pub teacher_info: ProfileInfo<Teacher>,
    pub assigned_subjects: Vec<Subject>,
    pub upcoming_assessments: Vec<Assessment>,
    pub recent_content: Vec<Content>,
    pub recent_announcements: Vec<Announcement>,
}

#[derive(Debug, Serialize)]
pub struct StudentDashboard {
    pub student_info: ProfileInfo<Student>,
    pub timetable: Vec<Timetable>,
    pub upcoming_assessments: Vec<Assessment>,
    pub recent_content: Vec<Content>,
    pub attendance_percentage: f64,
    pub recent_announcements: Vec<Announcement>,
}

/// 子女及其出勤率
#[derive(Debug, Serialize)]
pub struct ChildAttendance {
    pub student: Student,
    pub attendance_percentage: f64,
}

#[derive(Debug, Serialize)]
pub struct ParentDashboard {
    pub parent_info: ProfileInfo<Parent>,
    pub children: Vec<Student>,
    pub children_attendance: Vec<ChildAttendance>,
    pub unpaid_fees: Vec<FeePayment>,
    pub recent_announcements: Vec<Announcement>,
}
