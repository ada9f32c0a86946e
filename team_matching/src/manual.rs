/*!

This is the long-form manual for `team_matching` and `teamtrack`.

## Input formats

Two tables take part in an analysis:
* the **signup** table: one row per person who signed up individually;
* the **registration** table (optional): one row per team, with the team
  leader and up to three members side by side.

Both can be provided as CSV files, Excel workbooks (`xlsx`, `xls`, `xlsb`) or
OpenDocument spreadsheets. Some registration platforms export an HTML page
with an `.xls` extension: in that case the first HTML table of the page is
read. The first row is always the header.

### Signup columns

| Field | Default column name |
|-------|---------------------|
| full name | `Full Name` |
| email | `Email ID` |
| phone | `Phone Number` |
| partial ID | `Aadhaar Last 4 Digits` |
| region | `State`, `state`, `State Name`, `state_name`, `State/UT`, `Location`, `Address` |

### Registration columns

| Field | Default column name |
|-------|---------------------|
| team name | `Team Name` |
| leader | `Team Leader Name`, `Team Leader Email`, `Team Leader Phone Number`, `Team Leader Aadhaar Last 4 Digits` |
| member *n* (1 to 3) | `Member n Name`, `Member n Email`, `Member n Phone Number`, `Member n Aadhaar Last 4 Digits`, `Member n Role` |
| presentation | `PPT Link / File Name` |
| theme | `Theme` |
| university | `Team Leader University Name with address` |

The last three columns are only used by the registration overview.

All the names can be changed in the configuration file. A field whose column
cannot be found is read as empty for every row and a warning is logged.

## Matching

Each signup is compared to every person of the registrations:
1. by email address (case and surrounding spaces ignored),
2. then by phone number (only the last 10 digits are compared),
3. then by partial ID.

The first of these keys that finds a person decides the team and the role of
the signup. Empty values never match. When several people share the same
value, the first one in the order of the registration file wins.

The partial ID is only a few characters long: different people may share it,
and the matching will then link them to the same team. This is accepted as the
last resort.

## Reports

* `Registration Status`: all the signup columns, followed by the normalized
  keys, `Registered_Team` (`Yes`/`No`), `Team_Name`, `Team_Role` and `State`.
* `Summary`: the number of signups in a team, not in a team, and in total.
* `Team Summary`: for every team, the number of **signups** matched to it.
  People who registered in a team but never signed up are not counted.
* One workbook per region, with a single `<Region>_Participants` sheet. The
  region part of the file name is cut to 31 characters. Two regions that
  would get the same file name (`Tamil Nadu` and `Tamil_Nadu`) are told
  apart with a `_2` suffix.
* The registration overview, when a registration file is given: the
  registrations without repeated (team name, leader name) pairs, the teams
  without a presentation, and the number of teams per theme.

The JSON summary also lists the matched signups of every team (name, email,
phone and role).

## Configuration

The configuration is a JSON file. All the keys are optional:

```json
{
  "outputSettings": {
    "outputDirectory": "reports",
    "regionExports": true,
    "summaryPath": "summary.json"
  },
  "signupSource": { "filePath": "signups.csv" },
  "registrationSource": { "filePath": "teams.xls", "excelWorksheetName": "Sheet1" },
  "signupColumns": { "email": ["Email ID", "Email Address"] },
  "registrationColumns": { "memberRole": ["Member {n} Role", "Role of member {n}"], "theme": ["Track"] },
  "regions": ["Karnataka", "Kerala", "Tamil Nadu"]
}
```

In member column names, `{n}` stands for the slot number.

*/
