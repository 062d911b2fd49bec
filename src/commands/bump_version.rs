use {clap::ValueEnum, semver::Version};

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BumpLevel {
    #[value(help = "Bump major: x.y.z -> x+1.0.0")]
    Major,
    #[value(help = "Bump minor: x.y.z -> x.y+1.0")]
    Minor,
    #[default]
    #[value(help = "Bump patch: x.y.z -> x.y.z+1")]
    Patch,
}

pub fn bump_version(level: &BumpLevel, current: &Version) -> Version {
    let mut new_version = Version::new(current.major, current.minor, current.patch);
    match level {
        BumpLevel::Major => {
            new_version.major = new_version.major.saturating_add(1);
            new_version.minor = 0;
            new_version.patch = 0;
        }
        BumpLevel::Minor => {
            new_version.minor = new_version.minor.saturating_add(1);
            new_version.patch = 0;
        }
        BumpLevel::Patch => {
            new_version.patch = new_version.patch.saturating_add(1);
        }
    }

    new_version
}
