//! 看板页面片段
//!
//! 把各角色的看板数据渲染为 HTML，所有文本都经过转义。

use super::templates::escape_html;
use crate::models::academics::entities::{Content, Subject, Timetable};
use crate::models::assessments::entities::Assessment;
use crate::models::communications::entities::Announcement;
use crate::models::dashboard::responses::{
    AdminDashboard, ParentDashboard, StudentDashboard, TeacherDashboard,
};
use crate::models::profiles::entities::Student;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

fn stat(label: &str, value: impl std::fmt::Display) -> String {
    format!(
        r#"<li><span class="label">{}</span> <strong>{}</strong></li>"#,
        escape_html(label),
        escape_html(&value.to_string())
    )
}

fn stats(items: Vec<String>) -> String {
    format!(r#"<ul class="stats">{}</ul>"#, items.concat())
}

/// 标题加列表，列表为空时显示提示
fn section(title: &str, items: Vec<String>, empty: &str) -> String {
    let body = if items.is_empty() {
        format!(r#"<p class="empty">{}</p>"#, escape_html(empty))
    } else {
        format!("<ul>{}</ul>", items.concat())
    };
    format!(
        r#"<section><h2>{}</h2>{body}</section>"#,
        escape_html(title)
    )
}

fn item(text: &str) -> String {
    format!("<li>{}</li>", escape_html(text))
}

fn announcements(list: &[Announcement]) -> String {
    section(
        "Recent announcements",
        list.iter()
            .map(|a| {
                item(&format!(
                    "{} ({}): {}",
                    a.title,
                    a.created_date.format(DATE_FORMAT),
                    a.content
                ))
            })
            .collect(),
        "No announcements.",
    )
}

fn assessments(list: &[Assessment]) -> String {
    section(
        "Upcoming assessments",
        list.iter()
            .map(|a| {
                item(&format!(
                    "{} [{}] on {}, {} marks",
                    a.title,
                    a.assessment_type,
                    a.scheduled_date.format(DATE_FORMAT),
                    a.total_marks
                ))
            })
            .collect(),
        "No upcoming assessments.",
    )
}

fn contents(list: &[Content]) -> String {
    section(
        "Recent content",
        list.iter()
            .map(|c| item(&format!("{} ({}, {})", c.title, c.content_type, c.grade)))
            .collect(),
        "No content yet.",
    )
}

fn subjects(list: &[Subject]) -> String {
    section(
        "Assigned subjects",
        list.iter()
            .map(|s| item(&format!("{} - {}", s.code, s.name)))
            .collect(),
        "No subjects assigned.",
    )
}

fn timetable(list: &[Timetable]) -> String {
    section(
        "Timetable",
        list.iter()
            .map(|t| {
                item(&format!(
                    "{} period {}: {}-{}",
                    t.day, t.period, t.start_time, t.end_time
                ))
            })
            .collect(),
        "No timetable entries.",
    )
}

fn student_line(student: &Student) -> String {
    format!(
        "{} ({} {})",
        student.student_code, student.grade, student.section
    )
}

fn percentage(value: f64) -> String {
    format!("{value:.2}%")
}

pub fn admin_html(dashboard: &AdminDashboard) -> String {
    let year = dashboard
        .active_academic_year
        .as_ref()
        .map(|y| y.name.clone())
        .unwrap_or_else(|| "None".to_string());
    [
        stats(vec![
            stat("Students", dashboard.total_students),
            stat("Teachers", dashboard.total_teachers),
            stat("Parents", dashboard.total_parents),
            stat("Classes", dashboard.total_classes),
            stat("Subjects", dashboard.total_subjects),
            stat("Active academic year", year),
        ]),
        announcements(&dashboard.recent_announcements),
    ]
    .concat()
}

pub fn teacher_html(dashboard: &TeacherDashboard) -> String {
    [
        stats(vec![stat(
            "Teacher code",
            &dashboard.teacher_info.profile.teacher_code,
        )]),
        subjects(&dashboard.assigned_subjects),
        assessments(&dashboard.upcoming_assessments),
        contents(&dashboard.recent_content),
        announcements(&dashboard.recent_announcements),
    ]
    .concat()
}

pub fn student_html(dashboard: &StudentDashboard) -> String {
    let student = &dashboard.student_info.profile;
    [
        stats(vec![
            stat("Student code", &student.student_code),
            stat("Class", format!("{} {}", student.grade, student.section)),
            stat("Attendance", percentage(dashboard.attendance_percentage)),
        ]),
        timetable(&dashboard.timetable),
        assessments(&dashboard.upcoming_assessments),
        contents(&dashboard.recent_content),
        announcements(&dashboard.recent_announcements),
    ]
    .concat()
}

pub fn parent_html(dashboard: &ParentDashboard) -> String {
    [
        stats(vec![
            stat("Parent code", &dashboard.parent_info.profile.parent_code),
            stat("Children", dashboard.children.len()),
        ]),
        section(
            "Children attendance",
            dashboard
                .children_attendance
                .iter()
                .map(|c| {
                    item(&format!(
                        "{}: {}",
                        student_line(&c.student),
                        percentage(c.attendance_percentage)
                    ))
                })
                .collect(),
            "No children linked.",
        ),
        section(
            "Unpaid fees",
            dashboard
                .unpaid_fees
                .iter()
                .map(|f| {
                    item(&format!(
                        "Payment #{} for student #{}: {:.2} paid on {}",
                        f.id, f.student_id, f.amount_paid, f.payment_date
                    ))
                })
                .collect(),
            "No unpaid fees.",
        ),
        announcements(&dashboard.recent_announcements),
    ]
    .concat()
}
