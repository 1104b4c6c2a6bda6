//! Hosted service domain names.

/// Domain serving the web UI and the REST API.
pub const HOSTED_DOMAIN: &str = "beanstalkapp.com";

/// Domain serving Git over HTTPS.
pub const GIT_DOMAIN: &str = "git.beanstalkapp.com";

/// Domain serving Subversion.
pub const SVN_DOMAIN: &str = "svn.beanstalkapp.com";

/// Host name of an account, e.g. `acme.beanstalkapp.com`.
pub fn account_domain(account: &str) -> String {
    format!("{}.{}", account, HOSTED_DOMAIN)
}

/// Whether `host` is the hosted domain or one of its subdomains.
pub fn is_hosted_host(host: &str) -> bool {
    host == HOSTED_DOMAIN || host.ends_with(&format!(".{}", HOSTED_DOMAIN))
}

/// Whether `host` is the Git HTTPS domain or one of its subdomains.
pub fn is_git_host(host: &str) -> bool {
    host == GIT_DOMAIN || host.ends_with(&format!(".{}", GIT_DOMAIN))
}

/// Whether `host` is the Subversion domain or one of its subdomains.
pub fn is_svn_host(host: &str) -> bool {
    host == SVN_DOMAIN || host.ends_with(&format!(".{}", SVN_DOMAIN))
}

/// Rewrite a VCS host (`acme.git.beanstalkapp.com`, `svn.beanstalkapp.com`)
/// onto the web host.
pub fn web_host(host: &str) -> String {
    host.replace(GIT_DOMAIN, HOSTED_DOMAIN)
        .replace(SVN_DOMAIN, HOSTED_DOMAIN)
}

/// Account label of a web host, if the host carries one.
pub fn account_label(web_host: &str) -> Option<&str> {
    web_host
        .strip_suffix(HOSTED_DOMAIN)
        .and_then(|prefix| prefix.strip_suffix('.'))
        .and_then(|prefix| prefix.split('.').next())
        .filter(|label| !label.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_host_rewrites_vcs_domains() {
        assert_eq!(web_host("acme.git.beanstalkapp.com"), "acme.beanstalkapp.com");
        assert_eq!(web_host("acme.svn.beanstalkapp.com"), "acme.beanstalkapp.com");
        assert_eq!(web_host("git.beanstalkapp.com"), "beanstalkapp.com");
    }

    #[test]
    fn test_account_label() {
        assert_eq!(account_label("acme.beanstalkapp.com"), Some("acme"));
        assert_eq!(account_label("beanstalkapp.com"), None);
        assert_eq!(account_label("example.org"), None);
    }

    #[test]
    fn test_host_matching() {
        assert!(is_hosted_host("acme.beanstalkapp.com"));
        assert!(!is_hosted_host("beanstalkapp.com.evil.org"));
        assert!(is_git_host("acme.git.beanstalkapp.com"));
        assert!(!is_git_host("acme.beanstalkapp.com"));
        assert!(is_svn_host("acme.svn.beanstalkapp.com"));
        assert!(is_svn_host("svn.beanstalkapp.com"));
        assert!(!is_svn_host("svn.beanstalkapp.com.example.org"));
        assert!(!is_svn_host("mirror.beanstalkapp.com"));
    }
}
