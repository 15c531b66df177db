// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Locale-Aware View Renderer
//!
//! Maps operation results into the caller-facing views. With a resolved locale,
//! dates follow [`LocaleInfo::date_pattern`], food groups use their translated
//! names and weights use the culture's decimal separator. Without one, dates are
//! ISO-8601 and names are untranslated.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::application::request::ResultRenderer;
use crate::domain::food::{FoodGroup, WasteReport};
use crate::domain::locale::LocaleInfo;
use crate::domain::member::{HouseholdMember, MembershipTier};

const ISO_DATE: &str = "%Y-%m-%d";

/// Rendered result plus the culture it was rendered for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalizedView<T> {
    pub culture: Option<String>,
    pub data: T,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberView {
    pub id: Uuid,
    pub mail_address: String,
    pub membership: MembershipTier,
    pub membership_expires_on: Option<String>,
    pub registered_on: String,
    pub activated_on: Option<String>,
    pub privacy_policy_accepted_on: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodGroupView {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WasteLineView {
    pub food_group: String,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WasteReportView {
    pub households: usize,
    pub lines: Vec<WasteLineView>,
    pub total: String,
    pub last_recorded_on: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ViewRenderer;

impl ViewRenderer {
    pub fn new() -> Self {
        Self
    }

    fn format_date(at: DateTime<Utc>, locale: Option<&LocaleInfo>) -> String {
        let pattern = locale.map(LocaleInfo::date_pattern).unwrap_or(ISO_DATE);
        at.format(pattern).to_string()
    }

    fn format_weight(grams: u64, locale: Option<&LocaleInfo>) -> String {
        let kilograms = format!("{:.1}", grams as f64 / 1000.0);
        let uses_decimal_comma =
            locale.is_some_and(|l| matches!(l.language(), "de" | "fr" | "es" | "it" | "nl" | "sv"));
        if uses_decimal_comma {
            format!("{} kg", kilograms.replace('.', ","))
        } else {
            format!("{} kg", kilograms)
        }
    }

    fn wrap<T>(data: T, locale: Option<&LocaleInfo>) -> LocalizedView<T> {
        LocalizedView {
            culture: locale.map(|l| l.culture.clone()),
            data,
        }
    }
}

impl ResultRenderer<HouseholdMember> for ViewRenderer {
    type View = LocalizedView<MemberView>;

    fn render(&self, member: HouseholdMember, locale: Option<&LocaleInfo>) -> Self::View {
        let date = |at: DateTime<Utc>| Self::format_date(at, locale);
        Self::wrap(
            MemberView {
                id: member.id.0,
                mail_address: member.mail_address.to_string(),
                membership: member.membership,
                membership_expires_on: member.membership_expires_at.map(date),
                registered_on: date(member.registered_at),
                activated_on: member.activated_at.map(date),
                privacy_policy_accepted_on: member.privacy_policy_accepted_at.map(date),
            },
            locale,
        )
    }
}

impl ResultRenderer<Vec<FoodGroup>> for ViewRenderer {
    type View = LocalizedView<Vec<FoodGroupView>>;

    fn render(&self, groups: Vec<FoodGroup>, locale: Option<&LocaleInfo>) -> Self::View {
        let views = groups
            .iter()
            .map(|group| FoodGroupView {
                id: group.id.0,
                name: group.display_name(locale).to_string(),
            })
            .collect();
        Self::wrap(views, locale)
    }
}

impl ResultRenderer<WasteReport> for ViewRenderer {
    type View = LocalizedView<WasteReportView>;

    fn render(&self, report: WasteReport, locale: Option<&LocaleInfo>) -> Self::View {
        let lines = report
            .lines
            .iter()
            .map(|line| WasteLineView {
                food_group: line.food_group.display_name(locale).to_string(),
                amount: Self::format_weight(line.grams, locale),
            })
            .collect();
        Self::wrap(
            WasteReportView {
                households: report.households,
                lines,
                total: Self::format_weight(report.total_grams, locale),
                last_recorded_on: report.last_recorded_at.map(|at| Self::format_date(at, locale)),
            },
            locale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::food::WasteLine;
    use crate::domain::mail::MailAddress;
    use chrono::TimeZone;

    fn member() -> HouseholdMember {
        let registered = Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap();
        let mail = MailAddress::parse("alice@example.com").unwrap();
        let mut m = HouseholdMember::register(mail, registered);
        m.activate(registered);
        m
    }

    #[test]
    fn test_member_view_dates_follow_locale() {
        let renderer = ViewRenderer::new();

        let view = renderer.render(member(), Some(&LocaleInfo::new("de-DE")));
        assert_eq!(view.culture.as_deref(), Some("de-DE"));
        assert_eq!(view.data.registered_on, "14.03.2026");
        assert_eq!(view.data.activated_on.as_deref(), Some("14.03.2026"));
        assert_eq!(view.data.privacy_policy_accepted_on, None);

        let view = renderer.render(member(), None);
        assert_eq!(view.culture, None);
        assert_eq!(view.data.registered_on, "2026-03-14");
    }

    #[test]
    fn test_food_groups_are_translated() {
        let groups = vec![FoodGroup::new("Bread").with_translation("de", "Brot")];
        let view = ViewRenderer.render(groups, Some(&LocaleInfo::new("de-AT")));
        assert_eq!(view.data[0].name, "Brot");
    }

    #[test]
    fn test_waste_weights() {
        let report = WasteReport {
            households: 1,
            lines: vec![WasteLine {
                food_group: FoodGroup::new("Dairy"),
                grams: 1300,
            }],
            total_grams: 1300,
            last_recorded_at: Some(Utc.with_ymd_and_hms(2026, 5, 2, 18, 30, 0).unwrap()),
        };
        let view = ViewRenderer.render(report.clone(), Some(&LocaleInfo::new("de-DE")));
        assert_eq!(view.data.total, "1,3 kg");
        assert_eq!(view.data.last_recorded_on.as_deref(), Some("02.05.2026"));
        let view = ViewRenderer.render(report, None);
        assert_eq!(view.data.lines[0].amount, "1.3 kg");
        assert_eq!(view.data.last_recorded_on.as_deref(), Some("2026-05-02"));
    }
}
