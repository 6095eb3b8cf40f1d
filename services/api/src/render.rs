//! Plain-text rendering of dashboard data

use std::fmt::Write;

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::{
    HalfDayType, Holiday, Leave, LeaveBalance, LeaveDuration, LeaveStatus, ManagerApproval, Paged,
};

/// `Jan 5, 2025`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// `Jan 5, 2025, 09:30 AM`, or `N/A` when absent
pub fn format_date_time(value: Option<NaiveDateTime>) -> String {
    match value {
        Some(value) => value.format("%b %-d, %Y, %I:%M %p").to_string(),
        None => "N/A".to_string(),
    }
}

pub fn status_badge(status: LeaveStatus) -> String {
    format!("[{}]", status)
}

/// Badge for half-day leave; empty for full days
pub fn duration_badge(duration: Option<LeaveDuration>, half: Option<HalfDayType>) -> String {
    match (duration, half) {
        (Some(LeaveDuration::HalfDay), Some(HalfDayType::FirstHalf)) => "(First Half)".to_string(),
        (Some(LeaveDuration::HalfDay), _) => "(Second Half)".to_string(),
        _ => String::new(),
    }
}

/// `Page x of y`; an empty collection still reads as page 1 of 1
pub fn page_info<T>(page: &Paged<T>) -> String {
    format!("Page {} of {}", page.number.saturating_add(1), page.total_pages.max(1))
}

fn days(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{} days", value),
        None => "N/A".to_string(),
    }
}

/// One leave as a block of lines
///
/// `with_employee` adds the requester, as shown on the admin dashboard.
pub fn leave(leave: &Leave, with_employee: bool) -> String {
    let mut out = String::new();
    let badge = duration_badge(leave.duration, leave.half_day_type);
    let _ = write!(
        out,
        "#{} {} to {}",
        leave.id,
        format_date(leave.start_date),
        format_date(leave.end_date)
    );
    if !badge.is_empty() {
        let _ = write!(out, " {}", badge);
    }
    let _ = writeln!(out, " {}", status_badge(leave.status));

    if with_employee {
        let name = leave.employee_name.as_deref().unwrap_or("Unknown");
        match &leave.employee_email {
            Some(email) => {
                let _ = writeln!(out, "  Employee: {} <{}>", name, email);
            }
            None => {
                let _ = writeln!(out, "  Employee: {}", name);
            }
        }
    }

    let _ = writeln!(out, "  Working Days: {}", days(leave.working_days));
    let _ = writeln!(out, "  Applied On: {}", format_date_time(leave.created_at));
    if leave.processed_at.is_some() {
        let _ = writeln!(out, "  Processed On: {}", format_date_time(leave.processed_at));
    }
    if let Some(by) = &leave.processed_by {
        let _ = writeln!(out, "  Processed By: {}", by);
    }
    let _ = writeln!(out, "  Reason: {}", leave.reason);
    if leave.can_cancel {
        let _ = writeln!(out, "  (can be cancelled)");
    }
    out
}

/// A page of leaves, or `empty` when there are none
pub fn leave_page(page: &Paged<Leave>, with_employee: bool, empty: &str) -> String {
    if page.is_empty() {
        return format!("{}\n", empty);
    }
    let mut out = String::new();
    for item in &page.content {
        out.push_str(&leave(item, with_employee));
    }
    let _ = writeln!(out, "{}", page_info(page));
    out
}

pub fn holidays(holidays: &[Holiday]) -> String {
    if holidays.is_empty() {
        return "No holidays found for this year\n".to_string();
    }
    let mut out = String::new();
    for holiday in holidays {
        match holiday.id {
            Some(id) => {
                let _ = writeln!(out, "#{} {} - {}", id, holiday.name, format_date(holiday.date));
            }
            None => {
                let _ = writeln!(out, "{} - {}", holiday.name, format_date(holiday.date));
            }
        }
    }
    out
}

pub fn balance(balance: &LeaveBalance) -> String {
    format!(
        "Leave balance {}\n  Total Entitlement: {:.1}\n  Used: {:.1}\n  Remaining: {:.1}\n  Carried Forward: {:.1}\n",
        balance.year,
        balance.total_entitlement,
        balance.used_leaves,
        balance.remaining_leaves,
        balance.carried_forward
    )
}

pub fn manager_page(page: &Paged<ManagerApproval>) -> String {
    if page.is_empty() {
        return "No manager approvals found\n".to_string();
    }
    let mut out = String::new();
    for approval in &page.content {
        let state = if approval.is_approved == Some(true) {
            "[APPROVED]"
        } else {
            "[PENDING APPROVAL]"
        };
        let _ = writeln!(
            out,
            "#{} {} ({}) {}",
            approval.id,
            approval.employee_name.as_deref().unwrap_or(&approval.username),
            approval.username,
            state
        );
        if let Some(email) = &approval.employee_email {
            let _ = writeln!(out, "  Email: {}", email);
        }
        if let Some(department) = &approval.department {
            let _ = writeln!(out, "  Department: {}", department);
        }
        let _ = writeln!(out, "  Registered: {}", format_date_time(approval.created_at));
        if let Some(by) = &approval.approved_by {
            let _ = writeln!(
                out,
                "  Approved By: {} on {}",
                by,
                format_date_time(approval.approved_at)
            );
        }
    }
    let _ = writeln!(out, "{}", page_info(page));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Leave {
        Leave {
            id: 4,
            employee_id: Some(7),
            employee_name: Some("Eve".to_string()),
            employee_email: Some("eve@example.com".to_string()),
            start_date: date(2025, 1, 5),
            end_date: date(2025, 1, 5),
            total_days: Some(0.5),
            working_days: Some(0.5),
            reason: "Dentist".to_string(),
            status: LeaveStatus::Approved,
            duration: Some(LeaveDuration::HalfDay),
            half_day_type: Some(HalfDayType::FirstHalf),
            processed_at: None,
            processed_by: Some("boss".to_string()),
            created_at: None,
            can_cancel: false,
        }
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(date(2025, 1, 5)), "Jan 5, 2025");
        assert_eq!(format_date(date(2024, 12, 25)), "Dec 25, 2024");
    }

    #[test]
    fn test_format_date_time() {
        let value = date(2025, 3, 1).and_hms_opt(14, 5, 0).unwrap();
        assert_eq!(format_date_time(Some(value)), "Mar 1, 2025, 02:05 PM");
        assert_eq!(format_date_time(None), "N/A");
    }

    #[test]
    fn test_badges() {
        assert_eq!(status_badge(LeaveStatus::Cancelled), "[CANCELLED]");
        assert_eq!(
            duration_badge(Some(LeaveDuration::HalfDay), Some(HalfDayType::SecondHalf)),
            "(Second Half)"
        );
        assert_eq!(duration_badge(Some(LeaveDuration::FullDay), None), "");
    }

    #[test]
    fn test_leave_block() {
        let text = leave(&sample(), true);
        assert!(text.starts_with("#4 Jan 5, 2025 to Jan 5, 2025 (First Half) [APPROVED]\n"));
        assert!(text.contains("  Employee: Eve <eve@example.com>\n"));
        assert!(text.contains("  Working Days: 0.5 days\n"));
        assert!(text.contains("  Processed By: boss\n"));
        assert!(!text.contains("Processed On"));
    }

    #[test]
    fn test_leave_page_info_and_empty() {
        let page = Paged {
            content: vec![sample()],
            total_pages: 3,
            total_elements: 11,
            number: 1,
            size: 5,
        };
        assert!(leave_page(&page, false, "none").ends_with("Page 2 of 3\n"));

        let empty = Paged::<Leave> {
            content: vec![],
            total_pages: 0,
            total_elements: 0,
            number: 0,
            size: 5,
        };
        assert_eq!(leave_page(&empty, false, "No leave requests found"), "No leave requests found\n");
        assert_eq!(page_info(&empty), "Page 1 of 1");

        let last = Paged::<Leave> {
            number: u32::MAX,
            total_pages: u32::MAX,
            ..empty
        };
        assert_eq!(page_info(&last), format!("Page {0} of {0}", u32::MAX));
    }
}
