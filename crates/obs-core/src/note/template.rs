//! Fixed skeleton for CRM contact records

/// Contact record skeleton; `{name}` is replaced with the note's filename
pub const PERSON_TEMPLATE: &str = "\
# {name}

## Details

### Personal

- **Email:**
- **Phone Number:**
- **Address:**
- **Birthday:**

### Professional

- **Education:**
- **Company/organisation:**
- **Role:**

## Relationships

- **Partner:**

### Family

- **Parents:**
- **Children:**

#### Pets


### Network


## Conversations and Events


## Notes


## Gifts

**Gift ideas:**

**Gifts given:**


## Tasks

";

/// Section headings every contact record starts with, in order
pub const PERSON_SECTIONS: &[&str] = &[
    "## Details",
    "### Personal",
    "### Professional",
    "## Relationships",
    "### Family",
    "#### Pets",
    "### Network",
    "## Conversations and Events",
    "## Notes",
    "## Gifts",
    "## Tasks",
];

/// Instantiate the contact skeleton for `name`
pub fn render_person(name: &str) -> String {
    PERSON_TEMPLATE.replacen("{name}", name, 1)
}
