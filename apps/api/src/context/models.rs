use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One named group of skills, e.g. `languages` → `["Python", "SQL"]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillGroup {
    pub category: String,
    pub items: Vec<String>,
}

/// Skill categories in declaration order.
///
/// Serializes as a JSON object (`{"languages": [...], "tools": [...]}`) but keeps
/// the categories ordered, which a `HashMap` would not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillGroups(pub Vec<SkillGroup>);

impl SkillGroups {
    pub fn get(&self, category: &str) -> Option<&[String]> {
        self.0
            .iter()
            .find(|g| g.category == category)
            .map(|g| g.items.as_slice())
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|g| g.category.as_str())
    }
}

impl Serialize for SkillGroups {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for group in &self.0 {
            map.serialize_entry(&group.category, &group.items)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SkillGroups {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct GroupsVisitor;

        impl<'de> Visitor<'de> for GroupsVisitor {
            type Value = SkillGroups;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of skill category to a list of skills")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut groups = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((category, items)) = access.next_entry::<String, Vec<String>>()? {
                    groups.push(SkillGroup { category, items });
                }
                Ok(SkillGroups(groups))
            }
        }

        deserializer.deserialize_map(GroupsVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub school: String,
    /// Free-form range, e.g. "2018-2021".
    pub year: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub role: String,
    pub company: String,
    pub desc: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: String,
    /// Comma-separated technology tags.
    pub tech: String,
    pub details: String,
}

/// The résumé the assistant answers from. Field order here is the order the
/// model sees in every system instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    pub profile: String,
    pub summary: String,
    pub contact: String,
    pub skills: SkillGroups,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
}

impl Resume {
    /// Name of the portfolio subject: the profile text up to the first comma.
    pub fn subject_name(&self) -> &str {
        self.profile
            .split(',')
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("the candidate")
    }
}
