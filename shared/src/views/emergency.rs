use serde::{Deserialize, Serialize};

/// Thai landline numbers are nine digits including the leading zero.
const LANDLINE_DIGITS: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmergencyContact {
    pub id: u8,
    pub region: &'static str,
    /// As printed, including any extension range such as `-09`.
    pub tel: &'static str,
}

const fn entry(id: u8, region: &'static str, tel: &'static str) -> EmergencyContact {
    EmergencyContact { id, region, tel }
}

/// Volunteer roadside mechanics run by the police; free nationwide, parts
/// only. Shown above the searchable list.
pub const ROADSIDE_HOTLINE: EmergencyContact = entry(0, "ตำรวจช่าง", "02-354-6324");

/// Short national numbers, pinned under the hotline regardless of the query.
pub const NATIONAL_LINES: [EmergencyContact; 2] = [
    entry(73, "ตำรวจทางหลวง (ทั่วประเทศ)", "1193"),
    entry(74, "กู้ภัยทั่วไทย", "1669"),
];

/// Provincial highway police stations.
pub const DIRECTORY: [EmergencyContact; 72] = [
    entry(1, "อุบลราชธานี", "0-4535-2600-09"),
    entry(2, "นครราชสีมา", "0-4242-0250-99"),
    entry(3, "ขอนแก่น", "0-4324-0250-98"),
    entry(4, "เชียงใหม่", "0-5392-0750-51"),
    entry(5, "พิษณุโลก", "0-5523-6400"),
    entry(6, "นครปฐม", "0-3424-0650"),
    entry(7, "สุราษฎร์ธานี", "0-7727-7600"),
    entry(8, "อุดรธานี", "0-4221-5750-99"),
    entry(9, "ชลบุรี", "0-3893-2600-08"),
    entry(10, "สงขลา", "0-7431-7301-30"),
    entry(11, "ปทุมธานี", "0-2598-8191"),
    entry(12, "พระนครศรีอยุธยา", "0-3524-9750"),
    entry(13, "ฉะเชิงเทรา", "0-3850-0099"),
    entry(14, "ศรีสะเกษ", "0-4582-9799"),
    entry(15, "ร้อยเอ็ด", "0-4361-9799"),
    entry(16, "เชียงราย", "0-5391-0788"),
    entry(17, "นครสวรรค์", "0-5621-9099"),
    entry(18, "นครศรีธรรมราช", "0-7530-4600"),
    entry(19, "พัทลุง", "0-7460-9977"),
    entry(20, "กาญจนบุรี", "0-3452-7600-49"),
    entry(21, "ลำปาง", "0-5423-7090"),
    entry(22, "ระยอง", "0-3892-8090"),
    entry(23, "สภ.หัวหิน", "0-3261-8090"),
    entry(24, "ภูเก็ต", "0-7636-0790"),
    entry(25, "นราธิวาส", "0-7351-7990"),
    entry(26, "ราชบุรี", "0-3271-9798"),
    entry(27, "กาฬสินธุ์", "0-4380-9799"),
    entry(28, "เพชรบูรณ์", "0-5671-7799"),
    entry(29, "ปัตตานี", "0-7334-5999"),
    entry(30, "สระบุรี", "0-3624-0698"),
    entry(31, "สมุทรสาคร", "0-3441-9780"),
    entry(32, "สมุทรปราการ", "0-2338-0090"),
    entry(33, "จันทบุรี", "0-3931-9790"),
    entry(34, "ยะลา", "0-7322-0890"),
    entry(35, "ตรัง", "0-7520-1990"),
    entry(36, "กระบี่", "0-7562-7900"),
    entry(37, "กำแพงเพชร", "0-5571-8490"),
    entry(38, "ลำพูน", "0-5356-9790"),
    entry(39, "บุรีรัมย์", "0-4460-4090"),
    entry(40, "นครพนม", "0-4253-9790"),
    entry(41, "นนทบุรี", "02-528-7490"),
    entry(42, "สุพรรณบุรี", "035-514-000"),
    entry(43, "ชัยนาท", "056-459-639"),
    entry(44, "ลพบุรี", "036-418-900"),
    entry(45, "ชัยภูมิ", "044-815-000"),
    entry(46, "พิจิตร", "056-609-739"),
    entry(47, "ตาก", "055-518-000"),
    entry(48, "สุโขทัย", "055-609-739"),
    entry(49, "แพร่", "054-539-739"),
    entry(50, "พะเยา", "054-409-739"),
    entry(51, "น่าน", "054-683-000"),
    entry(52, "เลย", "042-808-739"),
    entry(53, "หนองบัวลำภู", "042-318-739"),
    entry(54, "หนองคาย", "042-415-000"),
    entry(55, "สกลนคร", "042-700-739"),
    entry(56, "มุกดาหาร", "042-629-739"),
    entry(57, "ยโสธร", "045-709-739"),
    entry(58, "สุรินทร์", "044-710-739"),
    entry(59, "สระแก้ว", "037-240-740"),
    entry(60, "ปราจีนบุรี", "037-239-098"),
    entry(61, "นครนายก", "037-307-000"),
    entry(62, "สมุทรสงคราม", "034-719-740"),
    entry(63, "เพชรบุรี", "032-709-740"),
    entry(64, "ชุมพร", "077-529-739"),
    entry(65, "พังงา", "076-401-439"),
    entry(66, "สตูล", "074-709-739"),
    entry(67, "ระนอง", "077-819-739"),
    entry(68, "สิงห์บุรี", "036-509798-99"),
    entry(69, "อ่างทอง", "035-617098-99"),
    entry(70, "ตราด", "039-552900-01"),
    entry(71, "อำนาจเจริญ", "045-519200-01"),
    entry(72, "มหาสารคาม", "043-719698-99"),
];

/// Digits to dial for a printed number. Formatting punctuation is dropped
/// and a trailing extension range on a landline (`0-4535-2600-09`) dials
/// the first number of the range.
#[must_use]
pub fn dial_number(tel: &str) -> String {
    let digits: String = tel.chars().filter(char::is_ascii_digit).collect();
    let is_mobile = matches!(digits.as_bytes().get(1), Some(b'6' | b'8' | b'9'));
    if digits.starts_with('0') && !is_mobile && digits.len() > LANDLINE_DIGITS {
        return digits[..LANDLINE_DIGITS].to_string();
    }
    digits
}

/// Case-sensitive substring match on the region name; an empty query
/// matches everything.
pub fn filter<'a>(
    contacts: &'a [EmergencyContact],
    query: &'a str,
) -> impl Iterator<Item = &'a EmergencyContact> + 'a {
    contacts.iter().filter(move |c| c.region.contains(query))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactView {
    pub id: u8,
    pub region: String,
    pub tel: String,
    /// For entries printed with an extension range this dials only the
    /// first number, so it can differ from `tel`.
    pub dial_uri: String,
}

impl From<&EmergencyContact> for ContactView {
    fn from(c: &EmergencyContact) -> Self {
        Self {
            id: c.id,
            region: c.region.to_string(),
            tel: c.tel.to_string(),
            dial_uri: format!("tel:{}", dial_number(c.tel)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyView {
    pub hotline: ContactView,
    pub national_lines: Vec<ContactView>,
    pub query: String,
    pub contacts: Vec<ContactView>,
}

#[must_use]
pub fn view(query: &str) -> EmergencyView {
    EmergencyView {
        hotline: ContactView::from(&ROADSIDE_HOTLINE),
        national_lines: NATIONAL_LINES.iter().map(ContactView::from).collect(),
        query: query.to_string(),
        contacts: filter(&DIRECTORY, query).map(ContactView::from).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn directory_ids_are_one_to_seventy_two() {
        let ids: HashSet<u8> = DIRECTORY.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), 72);
        assert_eq!(ids, (1..=72).collect::<HashSet<u8>>());
    }

    #[test]
    fn empty_query_returns_everything() {
        assert_eq!(view("").contacts.len(), DIRECTORY.len());
    }

    #[test]
    fn substring_query_matches_region() {
        let hits: Vec<_> = filter(&DIRECTORY, "เชียง").map(|c| c.region).collect();
        assert_eq!(hits, ["เชียงใหม่", "เชียงราย"]);
    }

    #[test]
    fn unknown_query_returns_nothing() {
        assert!(view("Atlantis").contacts.is_empty());
    }

    #[test]
    fn national_lines_stay_pinned_while_filtering() {
        let view = view("Atlantis");
        let uris: Vec<_> = view.national_lines.iter().map(|c| c.dial_uri.as_str()).collect();
        assert_eq!(uris, ["tel:1193", "tel:1669"]);
        assert!(view.contacts.is_empty());
    }

    #[test]
    fn range_entries_dial_differently_from_printed_tel() {
        let contact = ContactView::from(&DIRECTORY[0]);
        assert_eq!(contact.tel, "0-4535-2600-09");
        assert_eq!(contact.dial_uri, "tel:045352600");
    }

    #[test]
    fn dial_numbers_strip_punctuation() {
        assert_eq!(dial_number("02-354-6324"), "023546324");
        assert_eq!(dial_number("035-514-000"), "035514000");
        assert_eq!(dial_number("1193"), "1193");
    }

    #[test]
    fn dial_numbers_drop_extension_ranges() {
        assert_eq!(dial_number("0-4535-2600-09"), "045352600");
        assert_eq!(dial_number("036-509798-99"), "036509798");
    }

    #[test]
    fn mobile_numbers_keep_all_digits() {
        assert_eq!(dial_number("081-234-5678"), "0812345678");
    }

    #[test]
    fn hotline_has_dial_uri() {
        assert_eq!(view("").hotline.dial_uri, "tel:023546324");
    }

    proptest! {
        #[test]
        fn filter_results_always_contain_query(idx in 0usize..72, start in 0usize..4, len in 1usize..4) {
            let region: Vec<char> = DIRECTORY[idx].region.chars().collect();
            let start = start.min(region.len() - 1);
            let end = (start + len).min(region.len());
            let query: String = region[start..end].iter().collect();
            let hits: Vec<_> = filter(&DIRECTORY, &query).collect();
            prop_assert!(hits.iter().any(|c| c.id == DIRECTORY[idx].id));
            prop_assert!(hits.iter().all(|c| c.region.contains(query.as_str())));
        }
    }
}
