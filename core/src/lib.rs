//! libjyutping-core
//!
//! Input segmentation, candidate paging and the front-end state machine
//! shared by cloud input crates. This crate knows nothing about any
//! particular suggestion provider: it turns full-buffer text changes and
//! decoded candidate lists into session state and a render-ready context,
//! and tells the front-end when (and what) to query.
//!
//! Public API:
//! - `Candidate` / `CandidateList` - paged suggestion strings
//! - `PageState` / `paginate` - pure paging arithmetic
//! - `Segmented` / `segment` - mixed-script buffer splitting
//! - `InputBuffer` - the composing text
//! - `ImeSession` / `InputState` - state carried across events
//! - `ImeContext` - data handed to the presentation layer
//! - `ImeEngine` / `QueryRequest` - the event-driven engine
//! - `Config` - behaviour knobs with TOML load/save

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub mod candidate;
pub use candidate::{Candidate, CandidateList, DEFAULT_PAGE_SIZE};

pub mod pagination;
pub use pagination::{paginate, PageState};

pub mod segmenter;
pub use segmenter::{segment, Segmented};

pub mod input_buffer;
pub use input_buffer::InputBuffer;

pub mod context;
pub use context::ImeContext;

pub mod session;
pub use session::{ImeSession, InputState};

pub mod ime_engine;
pub use ime_engine::{ImeEngine, QueryRequest};

/// Generic configuration for the IME front-end core.
///
/// Provider-specific options (endpoint, input-tool code, candidate limits)
/// belong in the provider crate's config, which flattens this one.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Candidates shown per page
    pub page_size: usize,

    /// Debounce window (ms) before any selection has been made, and again
    /// right after the buffer empties; kept short so the first candidates
    /// feel immediate
    pub debounce_initial_ms: u64,

    /// Debounce window (ms) once a selection has been made; wider to
    /// coalesce rapid multi-character typing between selections
    pub debounce_settled_ms: u64,

    /// Convert committed text to simplified characters at the presentation
    /// boundary; internal state always keeps the provider's text
    pub simplified: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            debounce_initial_ms: 100,
            debounce_settled_ms: 200,
            simplified: false,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Debounce window before the first selection.
    pub fn initial_window(&self) -> Duration {
        Duration::from_millis(self.debounce_initial_ms)
    }

    /// Debounce window once a selection has been made.
    pub fn settled_window(&self) -> Duration {
        Duration::from_millis(self.debounce_settled_ms)
    }
}

/// Utility helpers.
pub mod utils {
    use once_cell::sync::Lazy;
    use std::collections::HashMap;

    /// Normalize input strings (NFC) and trim whitespace.
    pub fn normalize(s: &str) -> String {
        use unicode_normalization::UnicodeNormalization;
        s.nfc().collect::<String>().trim().to_string()
    }

    /// Traditional → simplified character table.
    ///
    /// Covers the high-frequency characters a suggestion provider actually
    /// returns; characters without an entry (including everything already
    /// simplified, and Cantonese-only characters like 嘅/哋/冇) pass through
    /// unchanged.
    static TRAD_TO_SIMP: Lazy<HashMap<char, char>> = Lazy::new(|| {
        let pairs: &[(char, char)] = &[
            ('萬', '万'), ('與', '与'), ('專', '专'), ('業', '业'), ('東', '东'),
            ('兩', '两'), ('個', '个'), ('豐', '丰'), ('臨', '临'), ('為', '为'),
            ('麗', '丽'), ('舉', '举'), ('義', '义'), ('樂', '乐'), ('習', '习'),
            ('鄉', '乡'), ('書', '书'), ('買', '买'), ('亂', '乱'), ('雲', '云'),
            ('亞', '亚'), ('產', '产'), ('親', '亲'), ('億', '亿'), ('僅', '仅'),
            ('從', '从'), ('倉', '仓'), ('儀', '仪'), ('價', '价'), ('眾', '众'),
            ('優', '优'), ('會', '会'), ('傷', '伤'), ('倫', '伦'), ('體', '体'),
            ('餘', '余'), ('靈', '灵'), ('辦', '办'), ('務', '务'), ('動', '动'),
            ('勵', '励'), ('勞', '劳'), ('勢', '势'), ('區', '区'), ('醫', '医'),
            ('華', '华'), ('協', '协'), ('單', '单'), ('賣', '卖'), ('廠', '厂'),
            ('歷', '历'), ('壓', '压'), ('廳', '厅'), ('縣', '县'), ('發', '发'),
            ('變', '变'), ('語', '语'), ('說', '说'), ('請', '请'), ('讀', '读'),
            ('誰', '谁'), ('課', '课'), ('謝', '谢'), ('證', '证'), ('計', '计'),
            ('記', '记'), ('講', '讲'), ('許', '许'), ('論', '论'), ('設', '设'),
            ('識', '识'), ('詞', '词'), ('試', '试'), ('詩', '诗'), ('話', '话'),
            ('該', '该'), ('門', '门'), ('問', '问'), ('閉', '闭'), ('開', '开'),
            ('關', '关'), ('間', '间'), ('馬', '马'), ('騎', '骑'), ('驚', '惊'),
            ('魚', '鱼'), ('鳥', '鸟'), ('雞', '鸡'), ('車', '车'), ('軍', '军'),
            ('輕', '轻'), ('載', '载'), ('輸', '输'), ('較', '较'), ('長', '长'),
            ('風', '风'), ('飛', '飞'), ('飯', '饭'), ('館', '馆'), ('飲', '饮'),
            ('頁', '页'), ('頭', '头'), ('顏', '颜'), ('題', '题'), ('順', '顺'),
            ('須', '须'), ('領', '领'), ('黃', '黄'), ('齊', '齐'), ('歲', '岁'),
            ('國', '国'), ('圖', '图'), ('圓', '圆'), ('園', '园'), ('團', '团'),
            ('電', '电'), ('現', '现'), ('環', '环'), ('廣', '广'), ('應', '应'),
            ('聽', '听'), ('幾', '几'), ('機', '机'), ('對', '对'), ('雙', '双'),
            ('難', '难'), ('觀', '观'), ('見', '见'), ('視', '视'), ('覺', '觉'),
            ('規', '规'), ('貝', '贝'), ('財', '财'), ('貴', '贵'), ('費', '费'),
            ('資', '资'), ('賽', '赛'), ('質', '质'), ('購', '购'), ('運', '运'),
            ('過', '过'), ('達', '达'), ('邊', '边'), ('這', '这'), ('遠', '远'),
            ('違', '违'), ('連', '连'), ('錢', '钱'), ('鐵', '铁'), ('錯', '错'),
            ('銀', '银'), ('錄', '录'), ('鍵', '键'), ('鏡', '镜'), ('陽', '阳'),
            ('陰', '阴'), ('際', '际'), ('隨', '随'), ('隊', '队'), ('階', '阶'),
            ('紅', '红'), ('級', '级'), ('紙', '纸'), ('組', '组'), ('細', '细'),
            ('終', '终'), ('結', '结'), ('給', '给'), ('統', '统'), ('繼', '继'),
            ('續', '续'), ('總', '总'), ('綠', '绿'), ('線', '线'), ('練', '练'),
            ('經', '经'), ('約', '约'), ('愛', '爱'), ('擊', '击'), ('據', '据'),
            ('擇', '择'), ('掃', '扫'), ('擁', '拥'), ('搶', '抢'), ('擔', '担'),
            ('樣', '样'), ('樹', '树'), ('橋', '桥'), ('檢', '检'), ('標', '标'),
            ('樓', '楼'), ('條', '条'), ('來', '来'), ('極', '极'), ('構', '构'),
            ('槍', '枪'), ('歡', '欢'), ('氣', '气'), ('漢', '汉'), ('滿', '满'),
            ('濟', '济'), ('濕', '湿'), ('灣', '湾'), ('淺', '浅'), ('測', '测'),
            ('準', '准'), ('熱', '热'), ('燈', '灯'), ('無', '无'), ('狀', '状'),
            ('獨', '独'), ('獲', '获'), ('當', '当'), ('畫', '画'), ('異', '异'),
            ('禮', '礼'), ('葉', '叶'), ('藝', '艺'), ('藥', '药'), ('蘭', '兰'),
            ('蘇', '苏'), ('處', '处'), ('號', '号'), ('蟲', '虫'), ('術', '术'),
            ('衛', '卫'), ('裝', '装'), ('裏', '里'), ('補', '补'), ('製', '制'),
            ('複', '复'), ('觸', '触'), ('寫', '写'), ('實', '实'), ('審', '审'),
            ('寬', '宽'), ('導', '导'), ('將', '将'), ('師', '师'), ('帶', '带'),
            ('幫', '帮'), ('幹', '干'), ('慶', '庆'), ('憶', '忆'), ('懷', '怀'),
            ('戰', '战'), ('戲', '戏'), ('戶', '户'), ('時', '时'), ('晝', '昼'),
            ('曉', '晓'), ('暈', '晕'), ('點', '点'), ('鐘', '钟'), ('學', '学'),
            ('孫', '孙'), ('寶', '宝'), ('層', '层'), ('屬', '属'), ('島', '岛'),
            ('嶺', '岭'), ('帳', '帐'), ('幣', '币'), ('係', '系'),
        ];
        pairs.iter().copied().collect()
    });

    /// Convert traditional characters to their simplified equivalents.
    ///
    /// Characters outside the table are passed through unchanged.
    pub fn to_simplified(s: &str) -> String {
        s.chars()
            .map(|ch| TRAD_TO_SIMP.get(&ch).copied().unwrap_or(ch))
            .collect()
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn normalize_trims_and_recomposes() {
            assert_eq!(normalize("  nei  "), "nei");
            // e + combining acute recomposes to é
            assert_eq!(normalize("e\u{301}"), "é");
        }

        #[test]
        fn to_simplified_maps_known_characters() {
            assert_eq!(to_simplified("個個都會話"), "个个都会话");
        }

        #[test]
        fn to_simplified_passes_unmapped_text_through() {
            assert_eq!(to_simplified("你好abc唔"), "你好abc唔");
        }
    }
}
