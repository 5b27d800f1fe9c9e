//! Canned advice derived from a match: recommendations, competitive
//! advantages, and interview focus areas.

use std::fmt::Display;

use crate::{
    extract::JobRequirement,
    profile::{Profile, Skill},
};

/// What the rules can see about a single match.
pub(crate) struct MatchContext<'a> {
    pub profile: &'a Profile,
    pub requirements: &'a [JobRequirement],
    /// Matched profile skills without duplicates, in first-match order.
    pub matched_skills: &'a [&'a Skill],
    pub missing_critical: &'a [String],
    pub missing_nice_to_have: &'a [String],
}

impl MatchContext<'_> {
    fn has_matched(&self, name: &str) -> bool {
        self.matched_skills.iter().any(|skill| skill.name == name)
    }

    fn matched_name_contains(&self, needle: &str) -> bool {
        self.matched_skills
            .iter()
            .any(|skill| skill.name.to_lowercase().contains(needle))
    }

    fn expert_skills(&self) -> impl Iterator<Item = &Skill> + '_ {
        self.matched_skills
            .iter()
            .copied()
            .filter(|skill| skill.proficiency >= EXPERT_PROFICIENCY)
    }

    /// The `n` most proficient matched skills, strongest first.
    fn strongest(&self, n: usize) -> Vec<&Skill> {
        let mut skills = self.matched_skills.to_vec();
        skills.sort_by(|a, b| b.proficiency.cmp(&a.proficiency));
        skills.truncate(n);
        skills
    }

    /// The project that shipped through the App Store, if any.
    fn published_project(&self) -> Option<&str> {
        self.profile
            .projects
            .iter()
            .find(|project| project.description.to_lowercase().contains("app store"))
            .map(|project| project.name.as_str())
    }
}

/// Emits `message` when `applies` holds.
struct Rule {
    applies: fn(&MatchContext<'_>) -> bool,
    message: fn(&MatchContext<'_>) -> String,
}

fn eval(rules: &[Rule], cx: &MatchContext<'_>) -> Vec<String> {
    rules
        .iter()
        .filter(|rule| (rule.applies)(cx))
        .map(|rule| (rule.message)(cx))
        .collect()
}

const EXPERT_PROFICIENCY: u8 = 8;
const MDM_SKILL: &str = "MDM (Mobile Device Management)";

const ADVANTAGES: &[Rule] = &[
    Rule {
        applies: |cx| cx.profile.skill(MDM_SKILL).is_some(),
        message: |cx| {
            format!(
                "Specialized MDM expertise - rare combination with {} years hands-on experience",
                cx.profile.experience_years(),
            )
        },
    },
    Rule {
        applies: |cx| ["Swift", "SwiftUI", "Core Data"].iter().all(|name| cx.has_matched(name)),
        message: |_| "Modern iOS stack mastery - SwiftUI + Core Data combination".to_string(),
    },
    Rule {
        applies: |cx| cx.has_matched("XPC Communication"),
        message: |_| {
            "Advanced system integration skills - XPC communication expertise".to_string()
        },
    },
    Rule {
        applies: |cx| cx.has_matched("Shell Scripting") && cx.has_matched("Command Line Tools"),
        message: |_| "Strong automation skills - Shell scripting + CLI tools".to_string(),
    },
    Rule {
        applies: |cx| cx.expert_skills().next().is_some(),
        message: |cx| format!("Expert-level skills: {}", join(cx.expert_skills().take(3))),
    },
    Rule {
        applies: |cx| cx.published_project().is_some(),
        message: |_| "Published App Store developer - proven shipping experience".to_string(),
    },
];

const INTERVIEW_FOCUS: &[Rule] = &[
    Rule {
        applies: |cx| !cx.matched_skills.is_empty(),
        message: |cx| format!("Emphasize expertise in: {}", join(cx.strongest(5))),
    },
    Rule {
        applies: |cx| !cx.missing_critical.is_empty(),
        message: |cx| {
            format!(
                "Prepare explanations for: {} - show learning plan",
                join(cx.missing_critical.iter().take(3)),
            )
        },
    },
    Rule {
        applies: |cx| cx.matched_name_contains("core data"),
        message: |_| {
            "Prepare Core Data questions: relationships, migrations, performance".to_string()
        },
    },
    Rule {
        applies: |cx| cx.matched_name_contains("swiftui"),
        message: |_| "SwiftUI deep dive: state management, custom views, animations".to_string(),
    },
    Rule {
        applies: |_| true,
        message: |_| "MDM domain expertise: SureMDM experience, enterprise challenges".to_string(),
    },
    Rule {
        applies: |_| true,
        message: |cx| {
            format!(
                "Published app discussion: {} architecture, challenges, learnings",
                cx.published_project().unwrap_or("portfolio app"),
            )
        },
    },
];

/// Lowercase skill names and how to go about learning them.
const LEARNING_PATHS: &[(&[&str], &str)] = &[
    (
        &["combine", "async/await"],
        "Take Apple's official documentation course (2-3 weeks)",
    ),
    (
        &["arkit", "realitykit"],
        "Build an AR project following Apple tutorials (1 month)",
    ),
    (&["cloudkit", "firebase"], "Integrate into {project} (2 weeks)"),
];

fn learning_path(cx: &MatchContext<'_>, skill: &str) -> String {
    let skill_lower = skill.to_lowercase();
    let path = LEARNING_PATHS
        .iter()
        .find(|(skills, _)| skills.contains(&skill_lower.as_str()))
        .map(|(_, path)| *path)
        .unwrap_or("Add to learning priority (timeline varies)");
    let project = match cx.published_project() {
        Some(name) => format!("the existing {name} app"),
        None => "an existing project".to_string(),
    };

    format!("{}: {}", skill, path.replace("{project}", &project))
}

pub(crate) fn recommendations(cx: &MatchContext<'_>) -> Vec<String> {
    let mut recommendations = Vec::new();

    if !cx.missing_critical.is_empty() {
        recommendations.push(format!(
            "CRITICAL: Learn these skills immediately: {}",
            join(cx.missing_critical.iter().take(3)),
        ));
        for skill in cx.missing_critical.iter().take(5) {
            recommendations.push(learning_path(cx, skill));
        }
    }

    if !cx.missing_nice_to_have.is_empty() {
        recommendations.push(format!(
            "NICE-TO-HAVE: Consider learning: {}",
            join(cx.missing_nice_to_have.iter().take(3)),
        ));
    }

    let max_years = cx
        .requirements
        .iter()
        .filter_map(JobRequirement::required_years)
        .max();
    if let Some(years) = max_years {
        if f64::from(years) > cx.profile.experience_years() {
            recommendations.push(format!(
                "Experience gap: Role asks for {}+ years, you have {}. Emphasize depth of MDM experience.",
                years,
                cx.profile.experience_years(),
            ));
        }
    }

    recommendations
}

pub(crate) fn competitive_advantages(cx: &MatchContext<'_>) -> Vec<String> {
    eval(ADVANTAGES, cx)
}

pub(crate) fn interview_focus(cx: &MatchContext<'_>) -> Vec<String> {
    eval(INTERVIEW_FOCUS, cx)
}

pub(crate) fn join<T: Display>(items: impl IntoIterator<Item = T>) -> String {
    items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context<'a>(
        profile: &'a Profile,
        matched: &'a [&'a Skill],
        missing_critical: &'a [String],
    ) -> MatchContext<'a> {
        MatchContext {
            profile,
            requirements: &[],
            matched_skills: matched,
            missing_critical,
            missing_nice_to_have: &[],
        }
    }

    fn skills<'a>(profile: &'a Profile, names: &[&str]) -> Vec<&'a Skill> {
        names.iter().map(|name| profile.skill(name).unwrap()).collect()
    }

    #[test]
    fn learning_paths() {
        let profile = Profile::builtin().unwrap();
        let cx = context(&profile, &[], &[]);
        for (skill, expected) in [
            ("Combine", "Combine: Take Apple's official documentation course (2-3 weeks)"),
            ("Async/Await", "Async/Await: Take Apple's official documentation course (2-3 weeks)"),
            ("ARKit", "ARKit: Build an AR project following Apple tutorials (1 month)"),
            ("CloudKit", "CloudKit: Integrate into the existing NotingDown app (2 weeks)"),
            ("GraphQL", "GraphQL: Add to learning priority (timeline varies)"),
        ] {
            assert_eq!(learning_path(&cx, skill), expected);
        }
    }

    #[test]
    fn critical_recommendations_are_capped() {
        let profile = Profile::builtin().unwrap();
        let missing = ["Combine", "ARKit", "CloudKit", "GraphQL", "Redux", "Flutter", "AWS"]
            .map(String::from);
        let cx = context(&profile, &[], &missing);
        let recs = recommendations(&cx);

        assert_eq!(
            recs[0],
            "CRITICAL: Learn these skills immediately: Combine, ARKit, CloudKit",
        );
        // Headline plus one suggestion for each of the first five.
        assert_eq!(recs.len(), 6);
        assert!(recs[5].starts_with("Redux: "));
    }

    #[test]
    fn advantages() {
        let profile = Profile::builtin().unwrap();
        let matched = skills(
            &profile,
            &["Swift", "SwiftUI", "Core Data", "XPC Communication", "Shell Scripting"],
        );
        let advantages = competitive_advantages(&context(&profile, &matched, &[]));

        assert_eq!(advantages.len(), 5, "{:?}", advantages);
        assert!(advantages[0].starts_with("Specialized MDM expertise"));
        assert!(advantages[1].starts_with("Modern iOS stack mastery"));
        assert!(advantages[2].starts_with("Advanced system integration"));
        // Shell scripting without command line tools: no automation advantage.
        assert_eq!(advantages[3], "Expert-level skills: Swift, SwiftUI, Core Data");
        assert!(advantages[4].starts_with("Published App Store developer"));
    }

    #[test]
    fn no_matches_still_has_profile_advantages() {
        let profile = Profile::builtin().unwrap();
        let advantages = competitive_advantages(&context(&profile, &[], &[]));
        assert_eq!(advantages.len(), 2);
    }

    #[test]
    fn interview_focus_areas() {
        let profile = Profile::builtin().unwrap();
        let matched = skills(&profile, &["Git", "macOS Development", "SwiftUI"]);
        let missing = ["Combine".to_string()];
        let focus = interview_focus(&context(&profile, &matched, &missing));

        assert_eq!(
            focus,
            [
                "Emphasize expertise in: macOS Development, SwiftUI, Git",
                "Prepare explanations for: Combine - show learning plan",
                "SwiftUI deep dive: state management, custom views, animations",
                "MDM domain expertise: SureMDM experience, enterprise challenges",
                "Published app discussion: NotingDown architecture, challenges, learnings",
            ],
        );
    }

    #[test]
    fn fixed_focus_areas_are_unconditional() {
        let profile = Profile::builtin().unwrap();
        let focus = interview_focus(&context(&profile, &[], &[]));
        assert_eq!(focus.len(), 2);
    }
}
