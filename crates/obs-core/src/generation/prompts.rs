//! Message sequences sent to the generator.
//!
//! Order is always: system framing, optional exemplar, current document,
//! instruction.

use super::ChatMessage;

const APPEND_SYSTEM: &str = "\
You are a helpful assistant specialized in editing Markdown documents. \
You will be given the content of an existing markdown document, along with instructions on appending content. \
You must read the first message from the user, containing the current document content, \
then follow the user's instructions to write new content to append to the end of the note.

You must follow the below guidelines:
1. Your response must be a continuation of the existing file, such that concatenating the original content with your response results in a valid Markdown document.
2. Output ONLY markdown content, with no additional commentary, discussion, or follow-up.
3. Maintain correct and valid Markdown structure.
    - You may use features from Obsidian's markdown syntax such as [[wikilinks]] and admonitions.
    - Your response will be concatenated on a NEW LINE at the end of the existing content, account for this in your response.
4. Do NOT escape the Markdown content in your response with any delimiters such as ```markdown or ---.
5. Do not try to modify or restate existing content. Your response will be joined onto the end to produce the final document.
6. Maintain formatting that is consistent with the existing content (e.g. indentation, heading structure, use of lists).

The user will now send one message with the current document content, \
followed by another message with instructions on what to append. Follow their instructions closely.";

const INSERT_SYSTEM: &str = "\
You are a helpful assistant specialized in editing Markdown documents. \
You will be given the content of an existing markdown document, along with instructions on adding or modifying content. \
You must read the first message from the user, containing the current document content, \
then follow the user's instructions to update it in their second message.

You must follow the below guidelines:
1. Output ONLY markdown content, with no additional commentary, discussion, or follow-up.
2. Maintain correct and valid Markdown structure.
    - You may use features from Obsidian's markdown syntax such as [[wikilinks]] and admonitions.
3. Do NOT escape the Markdown content in your response with any delimiters such as ```markdown or ---.
4. Avoid modifying any existing content that the user has not explicitly asked you to change.
5. Maintain formatting that is consistent with the existing content (e.g. indentation, heading structure, use of lists).
6. You must return the entire document with your changes applied, your response will overwrite the existing file.

The user will now send one message with the current document content, \
followed by another message with instructions on how to update it. Follow their instructions closely.";

const CRM_INSERT_SYSTEM: &str = "\
You are a helpful assistant specialized in editing Markdown documents. \
You maintain a Customer Relationship Management (CRM) system for the user. \
You will be given the content of an existing document in the CRM, along with information to insert into it. \
You must read the first message from the user, containing the current document, \
then insert the information from the user's second message by deciding where it should be placed \
and how it should be formatted into the existing document.

You are provided a sample document in the following system message, and must adhere to this structure. \
You must follow the below guidelines:
1. Output ONLY markdown content, with no additional commentary, discussion, or follow-up.
2. Maintain correct and valid Markdown structure.
    - You must use features from Obsidian's markdown syntax such as [[wikilinks]] as they appear in the sample document.
        - Specifically, [[wikilinks]] are used to link together companies, organisations, people (using [[Firstname Lastname]]), and cities (e.g. [[Melbourne]]).
        - However, you should only link names of people when the full first and last name is known.
3. Do NOT escape the Markdown content in your response with any delimiters such as ```markdown or ---.
4. Avoid modifying any existing content that the user has not explicitly asked you to change.
5. Maintain formatting that is consistent with the existing content (e.g. indentation, heading structure, use of lists).
6. You may reword the content provided by the user to fit the structure, content, and format of the document.
7. You must return the entire document with the new content inserted, your response will overwrite the existing file.

The following message contains a sample CRM contact for John Doe. The user will then send a real CRM contact, \
and finally a piece of information for you to insert into the document at the appropriate location. \
Follow their instructions closely.";

/// Fully populated contact record showing the expected structure and
/// wikilink conventions
pub const CRM_EXEMPLAR: &str = "\
# John Doe

## Details

### Personal

- **Email:** jdoe@gmail.com
- **Phone Number:** (+61) 456 789 123
- **Address:** 42 Main Street, Carlton, [[Melbourne]], VIC, 3053, Australia
- **Birthday:** March 1st, 2000

### Professional

- **Education:**
\t- Bachelor of Science - Data Science
\t- Master of Science - Computer Science (AI)
- **Company/organisation:**
\t- [[Coca Cola]]
- **Role:**
\t- Lead Data Scientist

## Relationships

- **Partner:** [[Jane Doe]]

### Family

- **Parents:**
\t- [[Bob Doe]] (father)
\t- [[Jill Doe]] (mother)
- **Children:**
\t- [[Jimmy Doe]] (son)
- **Siblings:**
\t- [[Jack Doe]] (brother)

#### Pets

- Jimbob (goldfish)
- Penjamin (golden retriever)

### Network

- [[Kevin Rudd]] (manager)
- [[Julia Gillard]] (ex-lover)

## Conversations and Events

### [[2024-12-10]]

- Went for a river cruise with John and [[Jane Doe]]
- Discussed their new dog Penjamin, which they picked up on [[2024-12-05]]
- Crashed boat

### [[2024-08-28]]

- Went for dinner with John at Burger King
- Discussed his recent breakup with [[Julia Gillard]]

## Notes

- John barracks for the Geelong football club
- John's favourite ice-cream flavour is mint choc-chip

## Gifts

**Gift ideas:**
- Voucher for trapeze class
- How to Make Friends and Influence People (book)

**Gifts given:**
- Jimbob (goldfish)
- Lego set of the Eiffel tower

## Tasks

- [x] Buy Eiffel tower lego set for John
- [x] Book river cruise
- [ ] Pay insurance claim for crashed river cruise
";

/// Ask for a continuation to concatenate onto `current`
pub fn append_messages(current: &str, instruction: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(APPEND_SYSTEM),
        ChatMessage::user(current),
        ChatMessage::user(format!(
            "Instructions on what to append to the above document:\n\n{}",
            instruction
        )),
    ]
}

/// Ask for the whole document with the instruction applied
pub fn insert_messages(current: &str, instruction: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(INSERT_SYSTEM),
        ChatMessage::user(current),
        ChatMessage::user(format!(
            "Instructions to update above document content:\n\n{}",
            instruction
        )),
    ]
}

/// Ask for the whole contact record with new information merged in,
/// steered by [`CRM_EXEMPLAR`]
pub fn crm_insert_messages(filename: &str, current: &str, instruction: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(CRM_INSERT_SYSTEM),
        ChatMessage::system(CRM_EXEMPLAR),
        ChatMessage::user(current),
        ChatMessage::user(format!(
            "Content to insert into {}'s CRM contact:\n\n{}",
            filename, instruction
        )),
    ]
}
