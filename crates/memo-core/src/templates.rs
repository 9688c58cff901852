//! Built-in note templates.
//!
//! A fixed catalog of note skeletons, parameterized by `{date}` and `{title}`
//! placeholders. The catalog is read-only reference data; instantiation
//! always substitutes both placeholders, falling back to the current date
//! and a generic title, so a partially-formatted result cannot occur.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::GeneratedNote;

/// Title used when no override is supplied.
pub const DEFAULT_TITLE: &str = "New Note";

/// A note skeleton. `title` and `content` may contain `{date}` and `{title}`
/// placeholders resolved at instantiation time.
#[derive(Debug, Clone, Copy)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub title: &'static str,
    pub content: &'static str,
    pub tags: &'static [&'static str],
}

/// Catalog entry for listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
}

impl Template {
    pub fn summary(&self) -> TemplateSummary {
        TemplateSummary {
            id: self.id.to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            icon: self.icon.to_string(),
        }
    }
}

/// Placeholder overrides supplied at instantiation time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateOverrides {
    pub title: Option<String>,
    pub date: Option<String>,
}

/// The catalog, in fixed display order.
pub fn catalog() -> &'static [Template] {
    &CATALOG
}

/// Look up a template by id.
pub fn get(id: &str) -> Option<&'static Template> {
    CATALOG.iter().find(|t| t.id == id)
}

/// Instantiate a template, substituting `{date}` and `{title}` with the
/// supplied overrides or their defaults (current UTC date, "New Note").
pub fn instantiate(id: &str, overrides: &TemplateOverrides) -> Result<GeneratedNote> {
    let template =
        get(id).ok_or_else(|| Error::NotFound(format!("template '{}' not found", id)))?;

    let date = overrides
        .date
        .clone()
        .unwrap_or_else(|| Utc::now().format("%Y-%m-%d").to_string());
    let title = overrides
        .title
        .clone()
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    Ok(GeneratedNote {
        title: render(template.title, &title, &date),
        content: render(template.content, &title, &date),
        tags: template.tags.iter().map(|t| t.to_string()).collect(),
    })
}

fn render(pattern: &str, title: &str, date: &str) -> String {
    pattern.replace("{date}", date).replace("{title}", title)
}

static CATALOG: [Template; 6] = [
    Template {
        id: "meeting",
        name: "Meeting Notes",
        description:
            "Structured template for meeting notes with agenda, action items, and follow-ups",
        icon: "👥",
        title: "Meeting Notes - {date}",
        content: "## Meeting Details\n\
**Date:** {date}\n\
**Time:** \n\
**Attendees:** \n\
**Location/Platform:** \n\
\n\
## Agenda\n\
1. \n\
2. \n\
3. \n\
\n\
## Discussion Points\n\
- \n\
- \n\
\n\
## Action Items\n\
- [ ] Task 1 - Assigned to: \n\
- [ ] Task 2 - Assigned to: \n\
\n\
## Next Steps\n\
- \n\
\n\
## Additional Notes\n",
        tags: &["meeting", "work", "notes"],
    },
    Template {
        id: "project",
        name: "Project Planning",
        description:
            "Comprehensive project planning template with objectives, timeline, and risk assessment",
        icon: "📋",
        title: "Project Plan - {title}",
        content: "## Project Overview\n\
**Project Name:** \n\
**Start Date:** {date}\n\
**End Date:** \n\
**Project Manager:** \n\
**Team Members:** \n\
\n\
## Objectives\n\
- \n\
- \n\
\n\
## Scope\n\
### In Scope\n\
- \n\
\n\
### Out of Scope\n\
- \n\
\n\
## Timeline & Milestones\n\
- [ ] Milestone 1 - Due: \n\
- [ ] Milestone 2 - Due: \n\
\n\
## Resources Required\n\
- **Personnel:** \n\
- **Budget:** \n\
- **Tools/Software:** \n\
\n\
## Risk Assessment\n\
- **Risk 1:** \n\
  - Impact: \n\
  - Mitigation: \n\
\n\
## Success Criteria\n\
- \n",
        tags: &["project", "planning", "work"],
    },
    Template {
        id: "daily_journal",
        name: "Daily Journal",
        description: "Personal reflection template for daily journaling and goal setting",
        icon: "📔",
        title: "Daily Journal - {date}",
        content: "## {date} - Daily Reflection\n\
\n\
### Today's Priorities\n\
1. \n\
2. \n\
3. \n\
\n\
### Accomplishments\n\
✅ \n\
✅ \n\
\n\
### Challenges Faced\n\
- \n\
\n\
### Lessons Learned\n\
- \n\
\n\
### Gratitude\n\
- \n\
\n\
### Tomorrow's Goals\n\
- [ ] \n\
- [ ] \n\
\n\
### Notes & Reflections\n",
        tags: &["journal", "personal", "reflection"],
    },
    Template {
        id: "research",
        name: "Research Notes",
        description: "Academic research template with sources, citations, and analysis",
        icon: "🔍",
        title: "Research Notes - {title}",
        content: "## Research Topic: \n\
\n\
### Research Question\n\
What am I trying to find out?\n\
\n\
### Sources\n\
1. **Source 1:** \n\
   - Author: \n\
   - Date: \n\
   - URL/Reference: \n\
   - Key Points: \n\
\n\
2. **Source 2:** \n\
   - Author: \n\
   - Date: \n\
   - URL/Reference: \n\
   - Key Points: \n\
\n\
### Key Findings\n\
- \n\
- \n\
\n\
### Quotes & Citations\n\
> \"Quote 1\" - Author, Year\n\
\n\
### Analysis\n\
- \n\
\n\
### Questions for Further Research\n\
- \n\
\n\
### Next Steps\n\
- [ ] \n",
        tags: &["research", "study", "academic"],
    },
    Template {
        id: "book_review",
        name: "Book Review",
        description: "Book review template with ratings, quotes, and personal reflections",
        icon: "📚",
        title: "Book Review - {title}",
        content: "## Book Information\n\
**Title:** \n\
**Author:** \n\
**Genre:** \n\
**Publication Year:** \n\
**Pages:** \n\
**Rating:** ⭐⭐⭐⭐⭐\n\
\n\
## Summary\n\
Brief overview of the book's main points or plot:\n\
\n\
## Key Takeaways\n\
- \n\
- \n\
\n\
## Favorite Quotes\n\
> \"Quote 1\"\n\
\n\
## What I Liked\n\
- \n\
\n\
## What I Didn't Like\n\
- \n\
\n\
## Who Should Read This\n\
This book is perfect for:\n\
- \n\
\n\
## Personal Reflection\n\
How this book impacted me:\n\
\n\
## Related Books/Next Reading\n\
- \n",
        tags: &["book", "review", "reading"],
    },
    Template {
        id: "travel_plan",
        name: "Travel Itinerary",
        description: "Complete travel planning template with itinerary, budget, and checklists",
        icon: "✈️",
        title: "Travel Itinerary - {title}",
        content: "## Trip Overview\n\
**Destination:** \n\
**Dates:** {date} - \n\
**Duration:** \n\
**Travelers:** \n\
**Budget:** \n\
\n\
## Pre-Trip Checklist\n\
- [ ] Book flights\n\
- [ ] Reserve accommodation\n\
- [ ] Get travel insurance\n\
- [ ] Check passport/visa requirements\n\
- [ ] Pack essentials\n\
\n\
## Itinerary\n\
### Day 1 - {date}\n\
- **Morning:** \n\
- **Afternoon:** \n\
- **Evening:** \n\
\n\
### Day 2\n\
- **Morning:** \n\
- **Afternoon:** \n\
- **Evening:** \n\
\n\
## Accommodations\n\
- **Hotel/Airbnb:** \n\
- **Address:** \n\
- **Check-in:** \n\
- **Check-out:** \n\
\n\
## Transportation\n\
- **Flights:** \n\
- **Local Transport:** \n\
\n\
## Must-See Attractions\n\
- \n\
\n\
## Restaurants to Try\n\
- \n\
\n\
## Emergency Contacts\n\
- **Embassy:** \n\
- **Local Emergency:** \n\
\n\
## Budget Breakdown\n\
- **Flights:** $\n\
- **Accommodation:** $\n\
- **Food:** $\n\
- **Activities:** $\n\
- **Total:** $\n",
        tags: &["travel", "planning", "itinerary"],
    },
];
